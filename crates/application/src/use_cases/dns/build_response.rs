use crate::ports::ForwardGateway;
use std::sync::Arc;
use stubdns_domain::{rcode, Answer, DomainError, Header, HeaderFlags, Message, Question};
use tracing::{debug, warn};

/// A question whose upstream round trip failed. The response is still sent,
/// without an answer for it.
#[derive(Debug, Clone)]
pub struct ForwardFailure {
    pub question: Question,
    pub error: DomainError,
}

#[derive(Debug, Clone)]
pub struct ResponseOutcome {
    pub response: Message,
    pub forward_failures: Vec<ForwardFailure>,
}

/// Turns a decoded request into the response to send back.
///
/// Every question ends in exactly one of two ways: its first upstream answer
/// is merged in, or a stub answer pointing at 0.0.0.0 is synthesized. Upstream
/// is only consulted when a gateway is configured, the client set RD and the
/// request is a standard query.
pub struct BuildResponseUseCase {
    gateway: Option<Arc<dyn ForwardGateway>>,
}

impl BuildResponseUseCase {
    pub fn new() -> Self {
        Self { gateway: None }
    }

    pub fn with_gateway(mut self, gateway: Arc<dyn ForwardGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn is_forwarding(&self) -> bool {
        self.gateway.is_some()
    }

    pub async fn execute(&self, request: &Message) -> ResponseOutcome {
        let response_code = if request.is_standard_query() {
            rcode::NO_ERROR
        } else {
            rcode::NOT_IMPLEMENTED
        };

        let mut response = Message::new(Header::response_to(&request.header, response_code));
        let mut forward_failures = Vec::new();

        let gateway = self
            .gateway
            .as_deref()
            .filter(|_| request.recursion_desired() && request.is_standard_query());

        for question in &request.questions {
            response.push_question(question.normalized());

            let Some(gateway) = gateway else {
                response.header.flags.qr = true;
                response.push_answer(Answer::stub(question.name.clone()));
                debug!(domain = %question.name, "Stub answer synthesized");
                continue;
            };

            let query = forward_query(request, question, response_code);
            match gateway.forward(&query).await {
                Ok(reply) => {
                    response.header.flags = reply.header.flags;
                    match reply.first_answer() {
                        Some(answer) => {
                            debug!(
                                domain = %question.name,
                                upstream = %gateway.upstream(),
                                answer = %answer,
                                "Merged upstream answer"
                            );
                            response.push_answer(answer.clone());
                        }
                        None => {
                            debug!(
                                domain = %question.name,
                                upstream = %gateway.upstream(),
                                rcode = reply.rcode(),
                                "Upstream returned no answers"
                            );
                        }
                    }
                }
                Err(error) => {
                    warn!(
                        domain = %question.name,
                        upstream = %gateway.upstream(),
                        error = %error,
                        "Forwarding failed"
                    );
                    forward_failures.push(ForwardFailure {
                        question: question.clone(),
                        error,
                    });
                }
            }
        }

        ResponseOutcome {
            response,
            forward_failures,
        }
    }
}

impl Default for BuildResponseUseCase {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-question query sent upstream on behalf of `request`, asking for the
/// same A/IN question the response echoes.
fn forward_query(request: &Message, question: &Question, response_code: u8) -> Message {
    let flags = HeaderFlags {
        qr: false,
        opcode: request.opcode(),
        rd: request.recursion_desired(),
        rcode: response_code,
        ..Default::default()
    };
    Message::single_question(request.id(), flags, question.normalized())
}
