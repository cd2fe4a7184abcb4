use super::setup::emergency_restore;
use std::panic;

/// Chain a hook that restores the terminal before the previous hook prints
/// the panic. Call before [`ConsoleTerminal::open`](super::ConsoleTerminal::open).
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        emergency_restore();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_panic_hook() {
        install_panic_hook();
        let _ = panic::take_hook();
    }
}
