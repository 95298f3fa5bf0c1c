use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thirteenth_sim::CancelToken;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_interrupt(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Routes Ctrl-C into `cancel`. A second Ctrl-C falls back to the default
/// handler and kills the process.
pub fn cancel_on_ctrl_c(cancel: CancelToken) -> JoinHandle<()> {
    #[cfg(unix)]
    unsafe {
        libc::signal(
            libc::SIGINT,
            on_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t,
        );
    }
    watch(&INTERRUPTED, cancel)
}

/// Polls `flag` until it is raised or `cancel` fires some other way.
pub fn watch(flag: &'static AtomicBool, cancel: CancelToken) -> JoinHandle<()> {
    thread::spawn(move || {
        while !cancel.is_cancelled() {
            if flag.load(Ordering::SeqCst) {
                log::warn!("interrupted, finishing runs in flight");
                cancel.cancel();
                #[cfg(unix)]
                unsafe {
                    libc::signal(libc::SIGINT, libc::SIG_DFL);
                }
                break;
            }
            thread::sleep(Duration::from_millis(50));
        }
    })
}
