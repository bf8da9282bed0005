pub mod config;
pub mod events;

pub mod gui {
    pub mod app;
    pub mod dial;
    pub mod sched;
    pub mod slider;
    pub mod theme;
    pub mod window;
}

pub mod sys {
    pub mod runtime;
    pub mod server;
}
