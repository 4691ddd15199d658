#![no_main]
use arbiter::chess::board::Board;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = Board::try_from(s);
        // TODO: Check printing accepted boards back to the placement format.
    }
});
