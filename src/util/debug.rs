//! Debugging stuff.

use std::sync::{Mutex, LazyLock};
use std::collections::HashMap;

/// The state of the debug printing stuff.
#[derive(Debug, Default)]
pub(crate) struct DebugState {
    /// The indentation to use. Basically the call stack depth.
    pub(crate) indent: usize,
    /// The time the last printing finished.
    pub(crate) time: Option<std::time::Instant>,
    /// Map of phase addresses to the last line they showed up on.
    pub(crate) last_line: HashMap<&'static str, usize>,
    /// Current line.
    pub(crate) line: usize
}

pub(crate) static DEBUG_STATE: LazyLock<Mutex<DebugState>> = LazyLock::new(|| Mutex::new(DebugState::default()));

/// When dropped, decrements the indent.
pub(crate) struct Deindenter;

impl std::ops::Drop for Deindenter {
    #[allow(clippy::arithmetic_side_effects, reason = "Deindenter is constructed exactly once per debug! call and drops after.")]
    fn drop(&mut self) {
        if let Ok(mut state) = crate::util::debug::DEBUG_STATE.lock() {
            state.indent -= 1;
        }
    }
}

/// When the `debug` feature is enabled, prints the phase name, elapsed time since the last print, and any named values.
///
/// Silently does nothing when `debug` is disabled, so call sites pay no runtime cost in release builds.
macro_rules! debug {
    ($phase:expr $(, $name:ident)*) => {
        #[cfg(feature = "debug")]
        #[allow(clippy::arithmetic_side_effects, reason = "God help you if the resolver nests usize::MAX phases deep.")]
        let _deindenter = {
            let mut state = crate::util::debug::DEBUG_STATE.lock().expect("the debug state mutex to never be poisoned");
            state.line += 1;

            match state.time {
                Some(t) => eprint!("{:>4} {:>8.2?}", state.line, t.elapsed()),
                None    => eprint!("{:>4}         ", state.line)
            }

            eprint!(" {}{}", "|   ".repeat(state.indent), $phase);
            $(eprint!(concat!("; ", stringify!($name), ": {:?}"), $name);)*
            eprintln!();

            state.last_line.insert($phase, state.line);
            state.indent += 1;
            state.time = Some(std::time::Instant::now());

            crate::util::debug::Deindenter
        };
        #[cfg(not(feature = "debug"))]
        { $(let _ = &$name;)* }
    }
}

pub(crate) use debug;
