use hpack_rs::hpack::{Decoder, Encoder, Header};
use hpack_rs::Helper;

fn assert_headers(decoded: &[Header], expected: &[(&str, &str)]) {
    assert_eq!(decoded.len(), expected.len());
    for (h, (name, value)) in decoded.iter().zip(expected.iter()) {
        assert_eq!(h.name, name.as_bytes());
        assert_eq!(h.value, value.as_bytes());
    }
}

/// RFC 7541 Appendix C.3: three requests, literal (uncompressed) string
/// literals, sharing one decoder so the dynamic table accumulates
/// across the sequence.
#[test]
fn appendix_c_3_request_sequence_without_huffman() {
    let mut decoder = Decoder::new();

    let first = Helper::hex_to_vec(
        "828684410f7777772e6578616d706c652e636f6d",
    );
    let list: Vec<Header> = decoder.decode(&first).unwrap().into_iter().collect();
    assert_headers(
        &list,
        &[
            (":method", "GET"),
            (":scheme", "http"),
            (":path", "/"),
            (":authority", "www.example.com"),
        ],
    );
    assert_eq!(decoder.max_table_size(), 4096);

    let second = Helper::hex_to_vec(
        "828684be58086e6f2d6361636865",
    );
    let list: Vec<Header> = decoder.decode(&second).unwrap().into_iter().collect();
    assert_headers(
        &list,
        &[
            (":method", "GET"),
            (":scheme", "http"),
            (":path", "/"),
            (":authority", "www.example.com"),
            ("cache-control", "no-cache"),
        ],
    );

    let third = Helper::hex_to_vec(
        "828785bf400a637573746f6d2d6b65790c637573746f6d2d76616c7565",
    );
    let list: Vec<Header> = decoder.decode(&third).unwrap().into_iter().collect();
    assert_headers(
        &list,
        &[
            (":method", "GET"),
            (":scheme", "https"),
            (":path", "/index.html"),
            (":authority", "www.example.com"),
            ("custom-key", "custom-value"),
        ],
    );
}

/// RFC 7541 Appendix C.4: the same three requests, Huffman-coded string
/// literals.
#[test]
fn appendix_c_4_request_sequence_with_huffman() {
    let mut decoder = Decoder::new();

    let first = Helper::hex_to_vec(
        "828684418cf1e3c2e5f23a6ba0ab90f4ff",
    );
    let list: Vec<Header> = decoder.decode(&first).unwrap().into_iter().collect();
    assert_headers(
        &list,
        &[
            (":method", "GET"),
            (":scheme", "http"),
            (":path", "/"),
            (":authority", "www.example.com"),
        ],
    );

    let second = Helper::hex_to_vec("828684be5886a8eb10649cbf");
    let list: Vec<Header> = decoder.decode(&second).unwrap().into_iter().collect();
    assert_headers(
        &list,
        &[
            (":method", "GET"),
            (":scheme", "http"),
            (":path", "/"),
            (":authority", "www.example.com"),
            ("cache-control", "no-cache"),
        ],
    );

    let third = Helper::hex_to_vec(
        "828785bf408825a849e95ba97d7f8925a849e95bb8e8b4bf",
    );
    let list: Vec<Header> = decoder.decode(&third).unwrap().into_iter().collect();
    assert_headers(
        &list,
        &[
            (":method", "GET"),
            (":scheme", "https"),
            (":path", "/index.html"),
            (":authority", "www.example.com"),
            ("custom-key", "custom-value"),
        ],
    );
}

/// RFC 7541 Appendix C.2.1: literal header field with incremental
/// indexing, new name, no Huffman.
#[test]
fn appendix_c_2_1_literal_with_incremental_indexing() {
    let mut decoder = Decoder::new();
    let input = Helper::hex_to_vec("400a637573746f6d2d6b65790d637573746f6d2d686561646572");
    let list: Vec<Header> = decoder.decode(&input).unwrap().into_iter().collect();
    assert_headers(&list, &[("custom-key", "custom-header")]);
}

/// RFC 7541 Appendix C.2.4: indexed header field from the static table.
#[test]
fn appendix_c_2_4_indexed_header_field() {
    let mut decoder = Decoder::new();
    let list: Vec<Header> = decoder.decode(&[0x82]).unwrap().into_iter().collect();
    assert_headers(&list, &[(":method", "GET")]);
}

/// The encoder's own output for the first C.4 request, fed back through
/// the decoder, reproduces the same header list.
#[test]
fn encoder_round_trips_with_huffman_enabled() {
    let mut encoder = Encoder::new();
    encoder.set_huffman_literals(true);
    let mut decoder = Decoder::new();

    let headers = [
        Header::new(":method", "GET"),
        Header::new(":scheme", "http"),
        Header::new(":path", "/"),
        Header::new(":authority", "www.example.com"),
    ];

    let mut out = Vec::new();
    encoder.encode_all(headers.iter(), &mut out);

    let list: Vec<Header> = decoder.decode(&out).unwrap().into_iter().collect();
    assert_eq!(list, headers);
}
