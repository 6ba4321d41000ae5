// Author: tickbh

//! Walks the RFC 7541 Appendix C.3/C.4 three-request sequences end to
//! end against a single decoder, the way a real HTTP/2 connection
//! would feed successive HEADERS frames through one HPACK context.
//!
//! Run with `cargo run --example http2` once this crate is wired into
//! a workspace with the dependencies resolved (this repository does
//! not invoke the toolchain itself).

use hpack_rs::hpack::{Decoder, Header};
use hpack_rs::Helper;

fn print_headers(label: &str, headers: &[Header]) {
    println!("{label}:");
    for h in headers {
        println!(
            "  {}: {}",
            String::from_utf8_lossy(&h.name),
            String::from_utf8_lossy(&h.value)
        );
    }
}

fn main() {
    let mut decoder = Decoder::new();

    let first = Helper::hex_to_vec("8286 8441 8cf1 e3c2 e5f2 3a6b a0ab 90f4 ff");
    let headers: Vec<Header> = decoder.decode(&first).unwrap().into_iter().collect();
    print_headers("request 1", &headers);
    assert_eq!(headers[0].name, b":method");

    let second = Helper::hex_to_vec("8286 84be 5886 a8eb 1064 9cbf");
    let headers: Vec<Header> = decoder.decode(&second).unwrap().into_iter().collect();
    print_headers("request 2", &headers);

    let third = Helper::hex_to_vec(
        "8287 85bf 4088 25a8 49e9 5ba9 7d7f 8925 a849 e95b b8e8 b4bf",
    );
    let headers: Vec<Header> = decoder.decode(&third).unwrap().into_iter().collect();
    print_headers("request 3", &headers);
}
