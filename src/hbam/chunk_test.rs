use super::Error;
use super::chunk::{decode_v3,decode_v7,ChunkBody,Data};

fn data(payload: &[u8],d: Data) -> Vec<u8> {
    d.bytes(payload).to_vec()
}

#[test]
fn v3_basic_stream() {
    // push 3, push 5, push 1, field 1 => "Name", pop, pop, pop
    let payload = [
        0xC1,0x03, 0xC1,0x05, 0xC1,0x01,
        0x41,0x04,b'N',b'a',b'm',b'e',
        0xC0,0xC0,0xC0
    ];
    let chunks = decode_v3(&payload).expect("decode failed");
    assert_eq!(chunks.len(),7);
    assert!(matches!(chunks[0].body,ChunkBody::PathPush(_)));
    match chunks[3].body {
        ChunkBody::FieldRefSimple { ref_simple, data: d } => {
            assert_eq!(ref_simple,1);
            assert_eq!(data(&payload,d),b"Name");
        },
        _ => panic!("wrong chunk type")
    }
    assert!(matches!(chunks[6].body,ChunkBody::PathPop));
}

#[test]
fn v3_anonymous_ref_and_data_simple() {
    // code 0x00 is a field ref with key 0; 0x80..0xBF are anonymous data
    let payload = [0x00,0x02,0xAA,0xBB, 0x82,0x01,0x02];
    let chunks = decode_v3(&payload).expect("decode failed");
    assert_eq!(chunks[0].ref_simple(),Some(0));
    match chunks[1].body {
        ChunkBody::DataSimple(d) => assert_eq!(data(&payload,d),[0x01,0x02]),
        _ => panic!("wrong chunk type")
    }
}

#[test]
fn v3_long_ref() {
    // opcode doubles as the key length
    let payload = [0x02,0x10,0x20,0x03,b'a',b'b',b'c'];
    let chunks = decode_v3(&payload).expect("decode failed");
    match chunks[0].body {
        ChunkBody::FieldRefLong { ref_long, data: d } => {
            assert_eq!(data(&payload,ref_long),[0x10,0x20]);
            assert_eq!(data(&payload,d),b"abc");
        },
        _ => panic!("wrong chunk type")
    }
}

#[test]
fn v3_extended_forms() {
    // 0xFF 0x41: extended simple ref 1 with 16-bit length
    let payload = [0xFF,0x41,0x00,0x03,b'x',b'y',b'z'];
    let chunks = decode_v3(&payload).expect("decode failed");
    assert!(chunks[0].extended);
    assert_eq!(chunks[0].ref_simple(),Some(1));
    // 0xFF 0x02: extended long ref with 2-byte key
    let payload = [0xFF,0x02,0x10,0x20,0x00,0x01,b'q'];
    let chunks = decode_v3(&payload).expect("decode failed");
    assert!(chunks[0].extended);
    assert!(matches!(chunks[0].body,ChunkBody::FieldRefLong{..}));
}

#[test]
fn v3_silent_skip() {
    // 01 FF 05 plus five more bytes vanish without a chunk
    let payload = [0x01,0xFF,0x05,0,0,0,0,0, 0xC0];
    let chunks = decode_v3(&payload).expect("decode failed");
    assert_eq!(chunks.len(),1);
    assert!(matches!(chunks[0].body,ChunkBody::PathPop));
}

#[test]
fn v3_declared_length_overruns() {
    let payload = [0x41,0xC8];
    assert!(matches!(decode_v3(&payload),Err(Error::DataExceedsSectorSize)));
}

#[test]
fn v3_inexact_consumption() {
    // the skip runs past the end, which legacy sectors treat as corrupt
    let payload = [0x01,0xFF,0x05,0,0,0];
    assert!(matches!(decode_v3(&payload),Err(Error::BadSector)));
}

#[test]
fn v3_bad_extended_subcode() {
    let payload = [0xFF,0x20,0x00];
    assert!(matches!(decode_v3(&payload),Err(Error::BadSector)));
}

#[test]
fn v7_terminator() {
    let payload = [0x40, 0x00,0x00, 0x41,0x99];
    let chunks = decode_v7(&payload).expect("decode failed");
    assert_eq!(chunks.len(),1);
    assert!(matches!(chunks[0].body,ChunkBody::PathPop));
}

#[test]
fn v7_field_refs() {
    // 0x06: ref and length bytes; 0x0E: 16-bit ref
    let payload = [
        0x06,0x10,0x02,0xAA,0xBB,
        0x0E,0x01,0x00,0x01,0xCC
    ];
    let chunks = decode_v7(&payload).expect("decode failed");
    assert_eq!(chunks[0].ref_simple(),Some(16));
    assert_eq!(chunks[1].ref_simple(),Some(256));
    match chunks[1].body {
        ChunkBody::FieldRefSimple { data: d, .. } => assert_eq!(data(&payload,d),[0xCC]),
        _ => panic!("wrong chunk type")
    }
}

#[test]
fn v7_segments() {
    let payload = [
        0x07,0x02,0x00,0x03,b'a',b'b',b'c',
        0x0F,0x80,0x05,0x00,0x01,b'z'
    ];
    let chunks = decode_v7(&payload).expect("decode failed");
    match chunks[0].body {
        ChunkBody::DataSegment { index, data: d } => {
            assert_eq!(index,2);
            assert_eq!(data(&payload,d),b"abc");
        },
        _ => panic!("wrong chunk type")
    }
    match chunks[1].body {
        ChunkBody::DataSegment { index, .. } => assert_eq!(index,5),
        _ => panic!("wrong chunk type")
    }
}

#[test]
fn v7_path_pushes() {
    let payload = [
        0x20,0x81,
        0x20,0xFE,1,2,3,4,5,6,7,8,
        0x28,0x01,0x02,
        0x30,0x01,0x02,0x03,
        0x38,0x02,0xAA,0xBB,
        0x40
    ];
    let chunks = decode_v7(&payload).expect("decode failed");
    let lens: Vec<usize> = chunks.iter().map(|c| match c.body {
        ChunkBody::PathPush(d) => d.len,
        _ => 0
    }).collect();
    assert_eq!(lens,[1,8,2,3,2,0]);
    assert!(matches!(chunks[5].body,ChunkBody::PathPop));
}

#[test]
fn v7_discard_code() {
    let payload = [0x80,0x80,0x40];
    let chunks = decode_v7(&payload).expect("decode failed");
    assert_eq!(chunks.len(),1);
}

#[test]
fn v7_unknown_code() {
    let payload = [0x17,0x00];
    assert!(matches!(decode_v7(&payload),Err(Error::UnrecognizedCode)));
}

#[test]
fn v7_overrun() {
    let payload = [0x06,0x10,0x20,0xAA];
    assert!(matches!(decode_v7(&payload),Err(Error::DataExceedsSectorSize)));
}

#[test]
fn v7_skip_padded_data() {
    // 0x1A carries a length byte plus two trailing bytes to discard
    let payload = [0x1A,0x01,0xAA,0x00,0x00, 0x40];
    let chunks = decode_v7(&payload).expect("decode failed");
    assert_eq!(chunks.len(),2);
    match chunks[0].body {
        ChunkBody::DataSimple(d) => assert_eq!(data(&payload,d),[0xAA]),
        _ => panic!("wrong chunk type")
    }
}
