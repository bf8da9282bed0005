use crate::gui::app::AppMsg;
use epochs::sched::{Scheduler, Tick, TimerId};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::Sender;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Monotonic clock shared by the tweens and the draw function.
pub fn now() -> Duration {
    Duration::from_micros(glib::monotonic_time().max(0) as u64)
}

enum Pending {
    Timeout(glib::SourceId),
    Frame(gtk::TickCallbackId),
}

/// `Scheduler` backed by the glib main loop. Firings come back into the
/// component as `AppMsg::Timer`.
pub struct GlibScheduler {
    sender: Sender<AppMsg>,
    widget: gtk::Widget,
    next_id: u64,
    // a source drops out of here as it fires, so cancel never removes a dead one
    live: Rc<RefCell<HashMap<TimerId, Pending>>>,
}

impl GlibScheduler {
    pub fn new(sender: Sender<AppMsg>, widget: gtk::Widget) -> Self {
        Self {
            sender,
            widget,
            next_id: 0,
            live: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    fn issue(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId::new(self.next_id)
    }
}

impl Scheduler for GlibScheduler {
    fn after(&mut self, delay: Duration, tick: Tick) -> TimerId {
        let id = self.issue();
        let live = self.live.clone();
        let sender = self.sender.clone();
        let source = glib::timeout_add_local_once(delay, move || {
            live.borrow_mut().remove(&id);
            sender.emit(AppMsg::Timer(id, tick));
        });
        self.live.borrow_mut().insert(id, Pending::Timeout(source));
        id
    }

    fn next_frame(&mut self, tick: Tick) -> TimerId {
        let id = self.issue();
        let live = self.live.clone();
        let sender = self.sender.clone();
        let callback = self.widget.add_tick_callback(move |_, _| {
            live.borrow_mut().remove(&id);
            sender.emit(AppMsg::Timer(id, tick));
            glib::ControlFlow::Break
        });
        self.live.borrow_mut().insert(id, Pending::Frame(callback));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let pending = self.live.borrow_mut().remove(&id);
        match pending {
            Some(Pending::Timeout(source)) => source.remove(),
            Some(Pending::Frame(callback)) => callback.remove(),
            None => {}
        }
    }
}

impl Drop for GlibScheduler {
    fn drop(&mut self) {
        let pending: Vec<Pending> = self.live.borrow_mut().drain().map(|(_, p)| p).collect();
        for p in pending {
            match p {
                Pending::Timeout(source) => source.remove(),
                Pending::Frame(callback) => callback.remove(),
            }
        }
    }
}
