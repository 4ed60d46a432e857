#![no_main]

use chiptone_spec::{canonical_request_hash, validate_request, Request};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(request) = Request::from_json(text) else {
        return;
    };

    // Validation must never panic, whatever the numbers are.
    let _ = validate_request(&request);
    let _ = canonical_request_hash(&request);

    // Re-serialized requests parse back to the same value.
    if let Ok(json) = request.to_json() {
        if let Ok(again) = Request::from_json(&json) {
            // NaN never survives JSON, so equality holds for everything parsed.
            assert_eq!(again, request);
        }
    }
});
