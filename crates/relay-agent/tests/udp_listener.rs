//! Integration tests for the UDP listener over the loopback interface.

use std::net::UdpSocket;

use relay_agent::application::run_relay::DatagramSource;
use relay_agent::infrastructure::network::UdpListener;
use relay_core::MAX_DATAGRAM_SIZE;

fn bind_loopback() -> UdpListener {
    UdpListener::bind("127.0.0.1:0".parse().unwrap()).expect("bind loopback")
}

/// Polls until a datagram arrives or the attempts run out.
fn recv_some(listener: &mut UdpListener) -> Option<relay_agent::application::run_relay::Datagram> {
    for _ in 0..10 {
        if let Some(d) = listener.recv().expect("recv") {
            return Some(d);
        }
    }
    None
}

#[test]
fn test_receives_payload_and_sender() {
    // Arrange
    let mut listener = bind_loopback();
    let target = listener.local_addr().unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();

    // Act
    sender.send_to(b"sleep", target).unwrap();
    let datagram = recv_some(&mut listener).expect("datagram must arrive");

    // Assert
    assert_eq!(datagram.payload, b"sleep");
    assert_eq!(datagram.sender, sender.local_addr().unwrap());
}

#[test]
fn test_datagram_of_exactly_max_size_is_accepted() {
    let mut listener = bind_loopback();
    let target = listener.local_addr().unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
    let payload = vec![b'x'; MAX_DATAGRAM_SIZE];

    sender.send_to(&payload, target).unwrap();
    let datagram = recv_some(&mut listener).expect("datagram must arrive");

    assert_eq!(datagram.payload.len(), MAX_DATAGRAM_SIZE);
}

#[test]
fn test_oversized_datagram_is_dropped_and_next_one_arrives() {
    // Arrange
    let mut listener = bind_loopback();
    let target = listener.local_addr().unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();

    // Act
    sender
        .send_to(&vec![b'y'; MAX_DATAGRAM_SIZE + 10], target)
        .unwrap();
    sender.send_to(b"wake", target).unwrap();
    let datagram = recv_some(&mut listener).expect("second datagram must arrive");

    // Assert
    assert_eq!(datagram.payload, b"wake");
}

#[test]
fn test_empty_datagram_is_delivered_as_empty_payload() {
    let mut listener = bind_loopback();
    let target = listener.local_addr().unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();

    sender.send_to(b"", target).unwrap();
    let datagram = recv_some(&mut listener).expect("datagram must arrive");

    assert!(datagram.payload.is_empty());
}
