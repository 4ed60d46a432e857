#![no_main]

use chiptone_audio::{decode_container, encode_container, ContainerBuffer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(decoded) = decode_container(data) else {
        return;
    };

    // Anything the decoder accepts re-encodes canonically and decodes again.
    let canonical = encode_container(decoded.samples.clone(), &decoded.format)
        .expect("decoded format must re-encode");
    let again = canonical.decode().expect("canonical container must decode");
    assert_eq!(again, decoded);

    let normalized = ContainerBuffer::from_bytes(data).expect("accepted input must normalize");
    assert_eq!(normalized, canonical);
});
