#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, RwLock};
use stubdns_application::ports::ForwardGateway;
use stubdns_domain::{Answer, DomainError, Header, HeaderFlags, Message};

/// Upstream reply to `query` with the given flags and answers.
pub fn reply_with(query: &Message, flags: HeaderFlags, answers: Vec<Answer>) -> Message {
    let mut reply = Message::new(Header {
        id: query.id(),
        flags,
        ..Default::default()
    });
    for question in &query.questions {
        reply.push_question(question.clone());
    }
    for answer in answers {
        reply.push_answer(answer);
    }
    reply
}

#[derive(Clone)]
enum Scripted {
    Addresses(Vec<Ipv4Addr>),
    Flags(HeaderFlags, Vec<Ipv4Addr>),
    Error(DomainError),
}

/// Gateway answering from a per-domain script. Unscripted domains get an empty
/// NOERROR reply.
#[derive(Clone)]
pub struct MockForwardGateway {
    script: Arc<RwLock<HashMap<String, Scripted>>>,
    received: Arc<Mutex<Vec<Message>>>,
}

impl MockForwardGateway {
    pub fn new() -> Self {
        Self {
            script: Arc::new(RwLock::new(HashMap::new())),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_addresses(&self, domain: &str, addresses: Vec<Ipv4Addr>) {
        self.script
            .write()
            .unwrap()
            .insert(domain.to_string(), Scripted::Addresses(addresses));
    }

    pub fn set_reply_flags(&self, domain: &str, flags: HeaderFlags, addresses: Vec<Ipv4Addr>) {
        self.script
            .write()
            .unwrap()
            .insert(domain.to_string(), Scripted::Flags(flags, addresses));
    }

    pub fn set_error(&self, domain: &str, error: DomainError) {
        self.script
            .write()
            .unwrap()
            .insert(domain.to_string(), Scripted::Error(error));
    }

    pub fn received(&self) -> Vec<Message> {
        self.received.lock().unwrap().clone()
    }

    fn default_flags(query: &Message) -> HeaderFlags {
        HeaderFlags {
            qr: true,
            rd: query.recursion_desired(),
            ra: true,
            ..Default::default()
        }
    }
}

impl Default for MockForwardGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForwardGateway for MockForwardGateway {
    async fn forward(&self, request: &Message) -> Result<Message, DomainError> {
        self.received.lock().unwrap().push(request.clone());

        let domain = request
            .questions
            .first()
            .map(|q| q.name.clone())
            .unwrap_or_default();
        let scripted = self.script.read().unwrap().get(&domain).cloned();

        let (flags, addresses) = match scripted {
            Some(Scripted::Error(error)) => return Err(error),
            Some(Scripted::Flags(flags, addresses)) => (flags, addresses),
            Some(Scripted::Addresses(addresses)) => (Self::default_flags(request), addresses),
            None => (Self::default_flags(request), vec![]),
        };

        let answers = addresses
            .into_iter()
            .map(|address| Answer::a(domain.clone(), 300, address))
            .collect();
        Ok(reply_with(request, flags, answers))
    }

    fn upstream(&self) -> String {
        "mock:53".to_string()
    }
}
