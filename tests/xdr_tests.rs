use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use xdr_wire::{
    Error, ErrorKind, from_bytes, from_bytes_partial, from_reader, to_bytes, to_slice, to_writer,
};

#[test]
fn test_bool_true() {
    let bytes = to_bytes(&true).unwrap();
    assert_eq!(bytes, [0, 0, 0, 1]);
    assert!(from_bytes::<bool>(&bytes).unwrap());
}

#[test]
fn test_i32_min_max() {
    for v in [i32::MIN, -1, 0, 1, i32::MAX] {
        assert_eq!(v, from_bytes::<i32>(&to_bytes(&v).unwrap()).unwrap());
    }
}

#[test]
fn test_narrow_ints_take_a_word() {
    assert_eq!(to_bytes(&-2i8).unwrap(), [0xFF, 0xFF, 0xFF, 0xFE]);
    assert_eq!(to_bytes(&200u8).unwrap(), [0, 0, 0, 200]);
    assert_eq!(from_bytes::<i8>(&[0xFF, 0xFF, 0xFF, 0xFE]).unwrap(), -2);
    assert_eq!(from_bytes::<u16>(&[0, 0, 0xAB, 0xCD]).unwrap(), 0xABCD);
}

#[test]
fn test_u64_unsigned_hyper() {
    let bytes = to_bytes(&0x0102030405060708u64).unwrap();
    assert_eq!(bytes, [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(from_bytes::<u64>(&to_bytes(&u64::MAX).unwrap()).unwrap(), u64::MAX);
}

#[test]
fn test_f32_roundtrip() {
    for v in [std::f32::consts::PI, f32::INFINITY, f32::NAN, 0.0_f32, -0.0_f32] {
        let decoded: f32 = from_bytes(&to_bytes(&v).unwrap()).unwrap();
        assert_eq!(v.to_bits(), decoded.to_bits());
    }
}

#[test]
fn test_string_padding() {
    for (s, total) in [("", 4usize), ("A", 8), ("ABC", 8), ("ABCD", 8), ("ABCDE", 12)] {
        let bytes = to_bytes(&s.to_string()).unwrap();
        assert_eq!(bytes.len(), total, "string {:?}", s);
        assert!(bytes[4 + s.len()..].iter().all(|&b| b == 0), "non-zero pad for {:?}", s);
        assert_eq!(s.to_string(), from_bytes::<String>(&bytes).unwrap());
    }
}

/// serde strings are opaque UTF-8, so text outside Latin-1 survives.
#[test]
fn test_string_utf8_is_lossless() {
    let s = "тестовая строка".to_string();
    assert_eq!(s, from_bytes::<String>(&to_bytes(&s).unwrap()).unwrap());
}

#[test]
fn test_string_invalid_utf8_is_corrupt() {
    let err = from_bytes::<String>(&[0, 0, 0, 1, 0xFF, 0, 0, 0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptData);
}

#[test]
fn test_option_none_some() {
    assert_eq!(to_bytes(&Option::<u32>::None).unwrap(), [0, 0, 0, 0]);
    let bytes = to_bytes(&Some(42u32)).unwrap();
    assert_eq!(bytes, [0, 0, 0, 1, 0, 0, 0, 42]);
    assert_eq!(Some(42u32), from_bytes::<Option<u32>>(&bytes).unwrap());
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct FileHandle {
    inode: u64,
    generation: u32,
    flags: u32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
enum FileType {
    Regular,
    Directory,
    Symlink(String),
    BlockDevice { major: u32, minor: u32 },
}

#[test]
fn test_struct_file_handle() {
    let fh = FileHandle { inode: 0x0102030405060708, generation: 42, flags: 0xFFFF };
    let bytes = to_bytes(&fh).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(fh, from_bytes(&bytes).unwrap());
}

#[test]
fn test_enum_variants() {
    assert_eq!(to_bytes(&FileType::Directory).unwrap(), [0, 0, 0, 1]);

    let link = FileType::Symlink("/etc/hosts".to_string());
    let bytes = to_bytes(&link).unwrap();
    assert_eq!(&bytes[..4], [0, 0, 0, 2]);
    assert_eq!(link, from_bytes(&bytes).unwrap());

    let dev = FileType::BlockDevice { major: 8, minor: 1 };
    let bytes = to_bytes(&dev).unwrap();
    assert_eq!(bytes, [0, 0, 0, 3, 0, 0, 0, 8, 0, 0, 0, 1]);
    assert_eq!(dev, from_bytes(&bytes).unwrap());
}

#[test]
fn test_vec_and_tuple() {
    let v: Vec<u32> = vec![1, 2, 3, 4, 5];
    let bytes = to_bytes(&v).unwrap();
    assert_eq!(&bytes[..4], [0, 0, 0, 5]);
    assert_eq!(bytes.len(), 24);
    assert_eq!(v, from_bytes::<Vec<u32>>(&bytes).unwrap());

    let t: (u32, i64, bool) = (1, -2, true);
    let bytes = to_bytes(&t).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(t, from_bytes(&bytes).unwrap());
}

#[test]
fn test_map_roundtrip() {
    let mut m = BTreeMap::new();
    m.insert("uid".to_string(), 1000u32);
    m.insert("gid".to_string(), 100u32);
    let bytes = to_bytes(&m).unwrap();
    assert_eq!(&bytes[..4], [0, 0, 0, 2]);
    assert_eq!(m, from_bytes::<BTreeMap<String, u32>>(&bytes).unwrap());
}

#[test]
fn test_byte_buf_is_opaque() {
    let payload = serde_bytes::ByteBuf::from(vec![1u8, 2, 3, 4, 5]);
    let bytes = to_bytes(&payload).unwrap();
    assert_eq!(bytes, [0, 0, 0, 5, 1, 2, 3, 4, 5, 0, 0, 0]);
    assert_eq!(payload, from_bytes::<serde_bytes::ByteBuf>(&bytes).unwrap());
}

#[test]
fn test_error_end_of_data() {
    let result = from_bytes::<u32>(&[0, 0, 0]);
    assert!(matches!(result, Err(Error::EndOfData { needed: 4, .. })));
}

#[test]
fn test_error_invalid_bool() {
    let err = from_bytes::<bool>(&[0, 0, 0, 2]).unwrap_err();
    assert!(matches!(err, Error::CorruptData(_)));
}

#[test]
fn test_error_corrupt_seq_count() {
    let err = from_bytes::<Vec<u32>>(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptData);
}

#[test]
fn test_partial_deserialization() {
    let mut buf = to_bytes(&42u32).unwrap();
    buf.extend(to_bytes(&99u32).unwrap());
    buf.extend([0xFF, 0xFF]);
    let (first, rest) = from_bytes_partial::<u32>(&buf).unwrap();
    assert_eq!(first, 42);
    let (second, remaining) = from_bytes_partial::<u32>(rest).unwrap();
    assert_eq!(second, 99);
    assert_eq!(remaining, [0xFF, 0xFF]);
}

#[test]
fn test_to_slice_fixed_buffer() {
    let fh = FileHandle { inode: 7, generation: 1, flags: 2 };
    let mut buf = [0u8; 32];
    let n = to_slice(&fh, &mut buf).unwrap();
    assert_eq!(n, 16);
    assert_eq!(&buf[..n], to_bytes(&fh).unwrap());

    let mut small = [0u8; 12];
    let err = to_slice(&fh, &mut small).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capacity);
}

#[test]
fn test_to_writer_matches_to_bytes() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Msg {
        id: u32,
        name: String,
        value: i64,
    }

    let msg = Msg { id: 7, name: "hello".into(), value: -9999 };
    let bytes = to_bytes(&msg).unwrap();
    let mut written = Vec::new();
    to_writer(&mut written, &msg).unwrap();
    assert_eq!(bytes, written, "to_writer must produce identical output to to_bytes");
}

#[test]
fn test_to_writer_cursor() {
    let cursor = to_writer(std::io::Cursor::new(Vec::new()), &0xDEADBEEFu32).unwrap();
    assert_eq!(cursor.into_inner(), [0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn test_from_reader_enum_and_struct() {
    let v = FileType::BlockDevice { major: 8, minor: 1 };
    let decoded: FileType = from_reader(std::io::Cursor::new(to_bytes(&v).unwrap())).unwrap();
    assert_eq!(v, decoded);

    let fh = FileHandle { inode: 99, generation: 3, flags: 0 };
    let decoded: FileHandle = from_reader(&to_bytes(&fh).unwrap()[..]).unwrap();
    assert_eq!(fh, decoded);
}

#[test]
fn test_reader_eof_error() {
    let result = from_reader::<_, u32>(std::io::Cursor::new([0u8, 0, 0]));
    assert!(matches!(result, Err(Error::EndOfData { .. })));
}

#[test]
fn test_deserialize_any_unsupported() {
    let err = from_bytes::<self_describing::Any>(&[0, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, Error::Unsupported(_)));
}

mod self_describing {
    use serde::de::{Deserialize, Deserializer, IgnoredAny};

    /// Only deserializable from a self-describing format.
    #[derive(Debug)]
    pub struct Any;

    impl<'de> Deserialize<'de> for Any {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            d.deserialize_any(IgnoredAny).map(|_| Any)
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
enum NfsFileType {
    Reg,
    Dir,
    Blk,
    Chr,
    Lnk,
    Sock,
    Fifo,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Fattr3 {
    ftype: NfsFileType,
    mode: u32,
    nlink: u32,
    uid: u32,
    gid: u32,
    size: u64,
    used: u64,
    fsid: u64,
    fileid: u64,
    atime_sec: u32,
    mtime_sec: u32,
    ctime_sec: u32,
}

#[test]
fn test_nfs_fattr3_both_backends() {
    let attr = Fattr3 {
        ftype: NfsFileType::Lnk,
        mode: 0o644,
        nlink: 1,
        uid: 1000,
        gid: 1000,
        size: 12345,
        used: 16384,
        fsid: 0xABCD_EF01_2345_6789,
        fileid: 1,
        atime_sec: 1700000000,
        mtime_sec: 1700000001,
        ctime_sec: 1700000001,
    };
    let bytes = to_bytes(&attr).unwrap();
    assert_eq!(bytes.len(), 4 * 8 + 8 * 4);
    assert_eq!(attr, from_bytes(&bytes).unwrap());
    assert_eq!(attr, from_reader(std::io::Cursor::new(&bytes[..])).unwrap());
}
