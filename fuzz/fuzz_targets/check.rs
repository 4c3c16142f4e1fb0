#![no_main]

use cbor_stream::io::SliceStream;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut input = SliceStream::new(data);
    _ = cbor_stream::wellformed::is_well_formed(&mut input);
});
