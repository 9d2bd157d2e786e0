#![no_main]

use bacprop_core::encoding::{reader::Reader, writer::Writer};
use bacprop_core::services::{ReadPropertyAck, WritePropertyRequest};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut buf = vec![0u8; data.len() + 16];

    let mut r = Reader::new(data);
    if let Ok(ack) = ReadPropertyAck::decode_after_header(&mut r) {
        let mut w = Writer::new(&mut buf);
        ack.encode(&mut w).expect("decoded ack must encode");
    }

    let mut r = Reader::new(data);
    if let Ok(req) = WritePropertyRequest::decode_after_header(&mut r) {
        let mut w = Writer::new(&mut buf);
        req.encode(&mut w).expect("decoded request must encode");
    }
});
