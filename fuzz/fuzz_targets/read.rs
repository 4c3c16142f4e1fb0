#![no_main]

use cbor_stream::decode::{DataType, Reader};
use cbor_stream::io::SliceStream;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = Reader::new(SliceStream::new(data));
    loop {
        let t = reader.read_type();
        _ = (
            reader.raw_value(),
            reader.boolean(),
            reader.double(),
            reader.negative_integer(),
            reader.is_indefinite_length(),
            reader.syntax_error(),
        );
        if t == DataType::EndOfStream {
            break;
        }
    }
});
