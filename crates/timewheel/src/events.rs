use epochs::control::Command;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(Command),
    ConfigReload,
}
