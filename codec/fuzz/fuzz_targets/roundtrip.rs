#![no_main]

use arbitrary::Arbitrary;
use bincoder::{decode, decode_cfg, encode, Coder, Config, Fields};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

const PADDED_LEN: usize = 16;

#[derive(Arbitrary, Debug, Clone, Default, PartialEq)]
struct Item {
    id: u16,
    label: String,
}

impl Fields for Item {
    fn fields<C: Coder>(&mut self, coder: &mut C) {
        coder.u16(&mut self.id);
        coder.string(&mut self.label);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Record {
    a: u16,
    b: u32,
    c: u64,
    d: i16,
    e: i32,
    f: i64,
    compact: u64,
    digest: [u8; 8],
    padded: Bytes,
    items: Vec<Item>,
    name: String,
}

impl Fields for Record {
    fn fields<C: Coder>(&mut self, coder: &mut C) {
        coder.u16(&mut self.a);
        coder.u32(&mut self.b);
        coder.u64(&mut self.c);
        coder.i16(&mut self.d);
        coder.i32(&mut self.e);
        coder.i64(&mut self.f);
        coder.varint(&mut self.compact);
        coder.array(&mut self.digest);
        coder.bytes(PADDED_LEN, &mut self.padded);
        let mut count = self.items.len();
        coder.length(&mut count);
        coder.slice(count, &mut self.items, |c, item| c.field(item));
        coder.string(&mut self.name);
    }
}

#[derive(Arbitrary, Debug)]
struct RecordInput {
    a: u16,
    b: u32,
    c: u64,
    d: i16,
    e: i32,
    f: i64,
    compact: u64,
    digest: [u8; 8],
    padded: Vec<u8>,
    items: Vec<Item>,
    name: String,
}

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    Roundtrip(RecordInput),
    Decode(Vec<u8>),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Roundtrip(input) => {
            let mut record = Record {
                a: input.a,
                b: input.b,
                c: input.c,
                d: input.d,
                e: input.e,
                f: input.f,
                compact: input.compact,
                digest: input.digest,
                padded: Bytes::from(input.padded),
                items: input.items,
                name: input.name,
            };
            let encoded = encode(&mut record).expect("encoding into memory cannot fail");
            let decoded: Record = decode(encoded).expect("failed to decode a valid encoding");

            // Fixed buffers come back truncated or zero-padded to their declared length.
            let mut padded = record.padded.to_vec();
            padded.resize(PADDED_LEN, 0);
            record.padded = Bytes::from(padded);
            assert_eq!(decoded, record);
        }
        FuzzInput::Decode(data) => {
            let _ = decode_cfg::<Record>(&data[..], Config::with_max_len(1024));
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
