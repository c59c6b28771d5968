mod hint;
mod play;
mod route;
mod stages;
mod walk;

pub use hint::Hint;
pub use play::Play;
pub use route::Route;
pub use stages::Stages;
pub use walk::Walk;

use session::SessionEvent;

pub(crate) fn print_events(events: &[SessionEvent]) {
    for event in events {
        println!("{event}");
    }
}
