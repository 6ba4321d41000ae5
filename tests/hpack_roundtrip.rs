use hpack_rs::hpack::decoder::DecoderError;
use hpack_rs::hpack::{Decoder, Encoder, Header};

fn request_headers() -> Vec<Header> {
    vec![
        Header::new(":method", "GET"),
        Header::new(":scheme", "http"),
        Header::new(":path", "/"),
        Header::new(":authority", "www.example.com"),
        Header::new("cookie", "sekret"),
    ]
}

#[test]
fn fresh_pair_round_trips_a_full_request_and_keeps_cookie_out_of_the_table() {
    let mut encoder = Encoder::new();
    let mut decoder = Decoder::new();
    let headers = request_headers();

    let mut out = Vec::new();
    encoder.encode_all(headers.iter(), &mut out);
    let decoded: Vec<Header> = decoder.decode(&out).unwrap().into_iter().collect();

    assert_eq!(decoded, headers);
    // cookie is sensitive: it must never occupy a dynamic table slot.
    assert_eq!(decoder.decode(&[0xbe]).unwrap_err(), DecoderError::InvalidIndex);
}

#[test]
fn zero_max_size_disables_indexing_state_on_both_sides() {
    let mut encoder = Encoder::new();
    encoder.on_settings_header_table_size(0);
    let mut decoder = Decoder::new();
    decoder.set_max_table_size(0);

    let header = Header::new("x-request-id", "abc-123");

    let mut first = Vec::new();
    encoder.encode(&header, &mut first);
    let decoded_first: Vec<Header> = decoder.decode(&first).unwrap().into_iter().collect();
    assert_eq!(decoded_first, vec![header.clone()]);

    let mut second = Vec::new();
    encoder.encode(&header, &mut second);
    // The first call also carries the queued size-update instruction;
    // with that prefix stripped, the header encoding itself is
    // byte-identical the second time - no indexing state accrued.
    assert!(first.ends_with(&second));
    assert_eq!(decoder.table_dynamic_len(), 0);
}

#[test]
fn indexed_representation_with_zero_index_fails() {
    let mut decoder = Decoder::new();
    assert_eq!(
        decoder.decode(&[0x80]).unwrap_err(),
        DecoderError::InvalidIndex
    );
}

#[test]
fn truncated_literal_name_fails() {
    let mut decoder = Decoder::new();
    let input = [0x40, 0x0a, b'c', b'u', b's'];
    assert_eq!(
        decoder.decode(&input).unwrap_err(),
        DecoderError::UnexpectedEndOfStream
    );
}

#[test]
fn second_size_update_exceeding_peer_limit_fails() {
    use hpack_rs::hpack::integer::encode_integer;

    let mut decoder = Decoder::new();
    decoder.set_max_table_size(500);

    let mut input = Vec::new();
    encode_integer(0x20, 5, 100, &mut input); // first update, within limit
    encode_integer(0x20, 5, 9000, &mut input); // second update, exceeds limit
    assert_eq!(
        decoder.decode(&input).unwrap_err(),
        DecoderError::MaxSizeExceedsLimit
    );
}

#[test]
fn lowering_max_size_keeps_only_what_fits() {
    let mut encoder = Encoder::new();
    let mut decoder = Decoder::new();

    let mut out = Vec::new();
    encoder.encode(&Header::new("one", "1111111111"), &mut out);
    encoder.encode(&Header::new("two", "2222222222"), &mut out);
    encoder.encode(&Header::new("three", "3333333333"), &mut out);
    decoder.decode(&out).unwrap();

    // Shrink to fit only the newest entry.
    let newest_size = 32 + "three".len() + "3333333333".len();
    decoder.set_max_table_size(newest_size);
    assert_eq!(decoder.table_dynamic_len(), 1);
}
