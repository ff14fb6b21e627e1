use tapdance::{ProtocolFlags, TagHeader, decode_flags};

fn main() {
    afl::fuzz!(|data: &[u8]| {
        let Ok((header, raw)) = TagHeader::parse(data) else {
            assert!(data.len() < 2);
            return;
        };

        assert_eq!(decode_flags(data[0]), raw);
        assert_eq!(ProtocolFlags::from(raw), header.flags);
        assert_eq!(header.tag.to_byte(), data[1]);

        // re-encoding clears the reserved bits and nothing else
        let bytes = header.to_bytes();
        assert_eq!(bytes[0], data[0] & 0x81);
        assert_eq!(bytes[1], data[1]);
    });
}
