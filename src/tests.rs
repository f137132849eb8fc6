//! Integration tests for frame building, reply decoding, and the client

use crate::client::{Error, ErrorKind};
use crate::transport::TcpTransport;
use crate::RouterClient;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub(crate) mod support {
    use crate::transport::Transport;
    use bytes::Bytes;
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Mutex;

    /// Transport double that replays scripted replies and records every
    /// frame the client hands it, keeping queries and actions apart.
    pub(crate) struct ScriptedTransport {
        replies: Mutex<VecDeque<io::Result<Bytes>>>,
        requested: Mutex<Vec<String>>,
        sent: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new() -> Self {
            ScriptedTransport {
                replies: Mutex::new(VecDeque::new()),
                requested: Mutex::new(Vec::new()),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn with_reply(raw: &str) -> Self {
            let transport = Self::new();
            transport.push_reply(raw);
            transport
        }

        pub(crate) fn with_error(error: io::Error) -> Self {
            let transport = Self::new();
            transport.replies.lock().unwrap().push_back(Err(error));
            transport
        }

        pub(crate) fn push_reply(&self, raw: &str) {
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(Bytes::copy_from_slice(raw.as_bytes())));
        }

        /// Frames that went through [`Transport::request`], in call order.
        pub(crate) fn requested_frames(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }

        /// Frames that went through [`Transport::send`], in call order.
        pub(crate) fn sent_frames(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for ScriptedTransport {
        async fn request(&self, frame: &str) -> io::Result<Bytes> {
            self.requested.lock().unwrap().push(frame.to_string());
            self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "reply script exhausted",
                ))
            })
        }

        async fn send(&self, frame: &str) -> io::Result<()> {
            self.sent.lock().unwrap().push(frame.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::support::ScriptedTransport;
    use super::*;

    fn client(transport: ScriptedTransport) -> RouterClient<ScriptedTransport> {
        RouterClient::with_transport(transport, 1, 2)
    }

    /// Accepts one connection, reads one frame, optionally answers, and
    /// returns what was read.
    async fn serve_one(listener: &TcpListener, reply: Option<&str>) -> String {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 64];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buffer.extend_from_slice(&chunk[..n]);
            if n == 0 || buffer.contains(&b'#') {
                break;
            }
        }
        if let Some(reply) = reply {
            socket.write_all(reply.as_bytes()).await.unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[tokio::test]
    async fn test_reply_payload_is_windowed_between_answer_and_terminator() {
        // The echoed parameters before '=' and anything after '#' are
        // routing noise as far as the payload is concerned.
        let scripted = client(ScriptedTransport::with_reply(
            "?V:1,C:103,G:17,B:1=5#trailing noise",
        ));
        let scene = scripted.query_last_scene_in_block(17, 1).await.unwrap();

        assert_eq!(scripted.transport().requested_frames(), [">V:1,C:103,G:17,B:1#"]);
        assert_eq!(scene, "5");
    }

    #[tokio::test]
    async fn test_empty_payloads_survive_as_empty_strings() {
        let scripted = client(ScriptedTransport::with_reply("?V:1,C:105,G:5=#"));
        let description = scripted.query_group_description(5).await.unwrap();

        assert_eq!(description, "");
    }

    #[tokio::test]
    async fn test_list_replies_keep_empty_segments() {
        let scripted = client(ScriptedTransport::with_reply("?V:1,C:101=1,,3#"));
        let clusters = scripted.query_clusters().await.unwrap();

        assert_eq!(clusters, ["1", "", "3"]);
    }

    #[tokio::test]
    async fn test_negative_time_zone_offsets_read_back_signed() {
        let scripted = client(ScriptedTransport::with_reply("?V:1,C:188=-18000#"));
        let offset = scripted.query_time_zone().await.unwrap();

        assert_eq!(offset, "-18000");
    }

    #[tokio::test]
    async fn test_device_survey_issues_one_frame_per_query() {
        let transport = ScriptedTransport::new();
        transport.push_reply("?V:1,C:104,@:1.2.1.63=1537#");
        transport.push_reply("?V:1,C:110,@:1.2.1.63=2#");
        transport.push_reply("?V:1,C:152,@:1.2.1.63=75#");

        let scripted = client(transport);
        let kind = scripted.query_device_type(1, 63).await.unwrap();
        let state = scripted.query_device_state(1, 63).await.unwrap();
        let level = scripted.query_load_level(1, 63).await.unwrap();

        assert_eq!((kind.as_str(), state.as_str(), level.as_str()), ("1537", "2", "75"));
        assert_eq!(
            scripted.transport().requested_frames(),
            [
                ">V:1,C:104,@:1.2.1.63#",
                ">V:1,C:110,@:1.2.1.63#",
                ">V:1,C:152,@:1.2.1.63#",
            ]
        );
    }

    #[tokio::test]
    async fn test_query_and_action_roundtrip_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let query = serve_one(&listener, Some("?V:1,C:114,@:1.2.1.63=1#")).await;
            let action = serve_one(&listener, None).await;
            (query, action)
        });

        let tcp = RouterClient::with_transport(TcpTransport::new(addr), 1, 2);
        assert!(tcp.query_device_faulty(1, 63).await.unwrap());
        tcp.recall_scene_on_device(1, 63, 1, 1, 0).await.unwrap();

        let (query, action) = server.await.unwrap();
        assert_eq!(query, ">V:1,C:114,@:1.2.1.63#");
        assert_eq!(action, ">V:1,C:12,B:1,S:1,F:0,@:1.2.1.63#");
    }

    #[tokio::test]
    async fn test_router_silence_times_out_instead_of_answering() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            // Take the frame, then sit on the open socket without replying.
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut chunk = [0u8; 64];
            let _ = socket.read(&mut chunk).await;
            tokio::time::sleep(Duration::from_millis(500)).await;
        });

        let transport = TcpTransport::new(addr).with_timeout(Duration::from_millis(50));
        let tcp = RouterClient::with_transport(transport, 1, 2);
        let err = tcp.query_device_disabled(1, 63).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        match err {
            Error::Transport { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::TimedOut);
            }
            other => panic!("expected a transport error, got {other:?}"),
        }
        server.abort();
    }
}
