pub fn set_panic_hook() {
    // With the `console_error_panic_hook` feature on, panics show up in the
    // browser console with their message instead of "unreachable executed".
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
