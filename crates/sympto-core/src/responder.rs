//! Text-in, text-out contract shared with outer layers.
//!
//! Chat transcripts and alternative responders only ever see replies as
//! strings; anything that can answer a message implements [`Responder`].

/// Anything that turns a user message into a reply.
pub trait Responder: Send + Sync {
    /// Produce a reply for one message. Never fails; unusable input gets a
    /// reply that says so.
    fn get_response(&self, text: &str) -> String;
}

impl<R: Responder + ?Sized> Responder for std::sync::Arc<R> {
    fn get_response(&self, text: &str) -> String {
        (**self).get_response(text)
    }
}

impl<R: Responder + ?Sized> Responder for Box<R> {
    fn get_response(&self, text: &str) -> String {
        (**self).get_response(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Echo;

    impl Responder for Echo {
        fn get_response(&self, text: &str) -> String {
            format!("echo: {}", text)
        }
    }

    #[test]
    fn responders_compose_through_smart_pointers() {
        let shared: Arc<dyn Responder> = Arc::new(Echo);
        assert_eq!(shared.get_response("hi"), "echo: hi");

        let boxed: Box<dyn Responder> = Box::new(Echo);
        assert_eq!(boxed.get_response("hi"), "echo: hi");
    }
}
