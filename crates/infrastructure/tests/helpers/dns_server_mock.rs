#![allow(dead_code)]
use std::collections::{HashMap, VecDeque};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

const TYPE_A: u16 = 1;
const TYPE_NS: u16 = 2;
const TYPE_CNAME: u16 = 5;
const TYPE_SOA: u16 = 6;

/// A resource record in the shape the mock writes onto the wire.
#[derive(Debug, Clone)]
pub enum MockRecord {
    A(&'static str, Ipv4Addr),
    Ns(&'static str, &'static str),
    Cname(&'static str, &'static str),
    Soa(&'static str, &'static str),
}

/// What the mock does with one incoming query.
#[derive(Debug, Clone)]
pub enum MockReply {
    Records {
        answers: Vec<MockRecord>,
        authorities: Vec<MockRecord>,
        additionals: Vec<MockRecord>,
    },
    /// Valid reply carrying someone else's transaction id.
    WrongId,
    /// Header-only reply with the given RCODE.
    Rcode(u8),
    /// Swallow the query.
    Silent,
    /// A few bytes that are not a DNS message.
    Garbage,
    /// The wrapped reply, sent only after the delay.
    Delayed(Duration, Box<MockReply>),
}

impl MockReply {
    pub fn answer(records: Vec<MockRecord>) -> Self {
        MockReply::Records {
            answers: records,
            authorities: vec![],
            additionals: vec![],
        }
    }

    pub fn referral(authorities: Vec<MockRecord>, additionals: Vec<MockRecord>) -> Self {
        MockReply::Records {
            answers: vec![],
            authorities,
            additionals,
        }
    }

    pub fn empty() -> Self {
        MockReply::answer(vec![])
    }

    pub fn after(delay: Duration, reply: MockReply) -> Self {
        MockReply::Delayed(delay, Box::new(reply))
    }
}

/// A query as the mock saw it.
#[derive(Debug, Clone)]
pub struct ReceivedQuery {
    pub id: u16,
    pub flags: u16,
    pub qname: String,
    pub qtype: u16,
}

impl ReceivedQuery {
    pub fn recursion_desired(&self) -> bool {
        self.flags & 0x0100 != 0
    }
}

type Script = Arc<Mutex<HashMap<String, VecDeque<MockReply>>>>;

/// Loopback DNS server answering from a per-name script.
///
/// Each queried name pops the next reply from its queue; the last reply of a
/// queue repeats forever. Names without a script are ignored.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedQuery>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(script: Vec<(&str, Vec<MockReply>)>) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?);
        let addr = socket.local_addr()?;

        let script: Script = Arc::new(Mutex::new(
            script
                .into_iter()
                .map(|(name, replies)| (normalize(name), replies.into_iter().collect()))
                .collect(),
        ));
        let received = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_received = Arc::clone(&received);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Some(query) = parse_query(&buf[..len]) else { continue };

                        let reply = next_reply(&script, &query.qname);
                        task_received.lock().unwrap().push(query.clone());

                        let delay = match &reply {
                            Some(MockReply::Delayed(delay, _)) => Some(*delay),
                            _ => None,
                        };
                        let Some(bytes) = reply.and_then(|r| build_response(&buf[..len], &query, &r)) else {
                            continue;
                        };

                        match delay {
                            Some(delay) => {
                                let socket = Arc::clone(&socket);
                                tokio::spawn(async move {
                                    tokio::time::sleep(delay).await;
                                    let _ = socket.send_to(&bytes, peer).await;
                                });
                            }
                            None => {
                                let _ = socket.send_to(&bytes, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn received(&self) -> Vec<ReceivedQuery> {
        self.received.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn normalize(name: &str) -> String {
    let lower = name.trim_end_matches('.').to_ascii_lowercase();
    format!("{}.", lower)
}

fn next_reply(script: &Script, qname: &str) -> Option<MockReply> {
    let mut script = script.lock().unwrap();
    let queue = script.get_mut(qname)?;
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

fn parse_query(packet: &[u8]) -> Option<ReceivedQuery> {
    if packet.len() < 12 {
        return None;
    }

    let id = u16::from_be_bytes([packet[0], packet[1]]);
    let flags = u16::from_be_bytes([packet[2], packet[3]]);

    let mut labels = Vec::new();
    let mut pos = 12;
    loop {
        let len = *packet.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = packet.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).to_string());
        pos += len;
    }
    let qtype = u16::from_be_bytes([*packet.get(pos)?, *packet.get(pos + 1)?]);

    Some(ReceivedQuery {
        id,
        flags,
        qname: normalize(&labels.join(".")),
        qtype,
    })
}

fn build_response(query: &[u8], parsed: &ReceivedQuery, reply: &MockReply) -> Option<Vec<u8>> {
    let (answers, authorities, additionals, rcode, id) = match reply {
        MockReply::Silent => return None,
        MockReply::Delayed(_, inner) => return build_response(query, parsed, inner),
        MockReply::Garbage => return Some(vec![0xde, 0xad, 0xbe]),
        MockReply::Rcode(rcode) => (&[][..], &[][..], &[][..], *rcode, parsed.id),
        MockReply::WrongId => (&[][..], &[][..], &[][..], 0, parsed.id.wrapping_add(1)),
        MockReply::Records {
            answers,
            authorities,
            additionals,
        } => (
            answers.as_slice(),
            authorities.as_slice(),
            additionals.as_slice(),
            0,
            parsed.id,
        ),
    };

    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&id.to_be_bytes());
    // QR=1, opcode 0, RD echoed from the query
    response.push(0x80 | (query[2] & 0x01));
    response.push(rcode & 0x0f);
    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
    response.extend_from_slice(&(authorities.len() as u16).to_be_bytes());
    response.extend_from_slice(&(additionals.len() as u16).to_be_bytes());

    // Question section is copied verbatim
    let question_end = 12 + encode_name(&parsed.qname).len() + 4;
    response.extend_from_slice(query.get(12..question_end)?);

    for record in answers.iter().chain(authorities).chain(additionals) {
        encode_record(&mut response, record);
    }

    Some(response)
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

fn encode_record(out: &mut Vec<u8>, record: &MockRecord) {
    let (owner, rtype, ttl, rdata) = match record {
        MockRecord::A(owner, ip) => (*owner, TYPE_A, 300u32, ip.octets().to_vec()),
        MockRecord::Ns(owner, target) => (*owner, TYPE_NS, 172_800, encode_name(target)),
        MockRecord::Cname(owner, target) => (*owner, TYPE_CNAME, 300, encode_name(target)),
        MockRecord::Soa(owner, mname) => {
            let mut rdata = encode_name(mname);
            rdata.extend(encode_name(&format!("hostmaster.{}", owner)));
            for field in [2024010101u32, 7200, 3600, 1_209_600, 3600] {
                rdata.extend_from_slice(&field.to_be_bytes());
            }
            (*owner, TYPE_SOA, 3600, rdata)
        }
    };

    out.extend(encode_name(owner));
    out.extend_from_slice(&rtype.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&ttl.to_be_bytes());
    out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    out.extend(rdata);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_name() {
        assert_eq!(
            encode_name("ab.c."),
            vec![2, b'a', b'b', 1, b'c', 0]
        );
        assert_eq!(encode_name("."), vec![0]);
    }

    #[tokio::test]
    async fn test_mock_server_ignores_unscripted_names() {
        let server = MockDnsServer::start(vec![]).await.unwrap();
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        let mut query = vec![0x12, 0x34, 0x00, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
        query.extend(encode_name("nothing.test."));
        query.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        client.send_to(&query, server.addr()).await.unwrap();

        let mut buf = vec![0u8; 512];
        let outcome = tokio::time::timeout(
            Duration::from_millis(100),
            client.recv_from(&mut buf),
        )
        .await;
        assert!(outcome.is_err(), "unscripted names get no reply");

        server.shutdown();
    }
}
