use httpfetch::runner::{Options, run};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

/// Serve exactly one connection on a loopback port: read one full request,
/// send `response`, and hand the captured request bytes back to the test.
fn serve_once(response: &'static str) -> (u16, mpsc::Receiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find_terminator(&request) {
                let body_len = content_length(&request[..pos]).unwrap_or(0);
                if request.len() >= pos + 4 + body_len {
                    break;
                }
            }
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        tx.send(request).unwrap();
    });

    (port, rx)
}

fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(headers: &[u8]) -> Option<usize> {
    let text = std::str::from_utf8(headers).ok()?;
    text.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("Content-Length")
            .then(|| value.trim().parse().ok())?
    })
}

fn run_to_string(options: &Options) -> String {
    let mut out = Vec::new();
    run(options, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn post_flow_echoes_sends_json_and_prints_response() {
    let (port, rx) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 12\r\n\r\nhello\nworld\n");

    let options = Options {
        url: format!("http://127.0.0.1:{port}/echo"),
        method: "POST".into(),
        body: "{name:neo}".into(),
        headers: String::new(),
    };
    let output = run_to_string(&options);

    let expected = format!(
        "URL: http://127.0.0.1:{port}/echo\n\
         Method: POST\n\
         Body: {{name:neo}}\n\
         Headers: \n\
         Response Body:\n\
         hello\n\
         world\n"
    );
    assert_eq!(output, expected);

    let request = String::from_utf8(rx.recv().unwrap()).unwrap();
    assert!(request.starts_with("POST /echo HTTP/1.1\r\n"));
    assert!(request.contains(&format!("Host: 127.0.0.1:{port}\r\n")));
    assert!(request.contains("Content-Length: 14\r\n"));
    assert!(request.ends_with("\r\n\r\n{\"name\":\"neo\"}"));
}

#[test]
fn get_never_carries_a_body_even_when_one_was_given() {
    let (port, rx) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok");

    let options = Options {
        url: format!("http://127.0.0.1:{port}/get"),
        method: "get".into(),
        body: "{a:1,b:2}".into(),
        headers: String::new(),
    };
    let output = run_to_string(&options);
    assert!(output.ends_with("Response Body:\nok\n"));

    let request = String::from_utf8(rx.recv().unwrap()).unwrap();
    assert!(request.starts_with("GET /get HTTP/1.1\r\n"));
    assert!(!request.contains("Content-Length"));
    assert!(!request.contains("{\"a\""));
}

#[test]
fn custom_header_reaches_the_wire() {
    let (port, rx) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok");

    let options = Options {
        url: format!("http://127.0.0.1:{port}/"),
        method: "GET".into(),
        body: String::new(),
        headers: "{X-Test:1}".into(),
    };
    run_to_string(&options);

    let request = String::from_utf8(rx.recv().unwrap()).unwrap();
    assert!(request.contains("X-Test: 1\r\n"));
}

#[test]
fn invalid_pair_stops_before_any_network_io() {
    // No server at all: validation fails first.
    let options = Options {
        url: "http://127.0.0.1:1/".into(),
        method: "POST".into(),
        body: "{a:1,bad}".into(),
        headers: String::new(),
    };
    let output = run_to_string(&options);

    assert!(output.contains("Body: {a:1,bad}\n"));
    assert!(output.ends_with("Invalid key-value pair: bad\n"));
    assert!(!output.contains("Response Body:"));
}

#[test]
fn invalid_header_pair_stops_before_any_network_io() {
    let options = Options {
        url: "http://127.0.0.1:1/".into(),
        method: "GET".into(),
        body: String::new(),
        headers: "{X-Test}".into(),
    };
    let output = run_to_string(&options);
    assert!(output.ends_with("Invalid key-value pair: X-Test\n"));
}

#[test]
fn unsupported_method_stops_without_sending() {
    let options = Options {
        url: "http://127.0.0.1:1/".into(),
        method: "TRACE".into(),
        body: String::new(),
        headers: String::new(),
    };
    let output = run_to_string(&options);
    assert!(output.ends_with("Unsupported HTTP method: TRACE\n"));
}

#[test]
fn bad_scheme_is_reported_as_invalid_url() {
    let options = Options {
        url: "ftp://example.test/".into(),
        method: "GET".into(),
        body: String::new(),
        headers: String::new(),
    };
    let output = run_to_string(&options);
    assert!(output.ends_with("Invalid URL: ftp://example.test/\n"));
}

#[test]
fn connection_failure_is_reported_as_send_error() {
    // Bind a port, then drop the listener so connecting to it is refused.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let options = Options {
        url: format!("http://127.0.0.1:{port}/"),
        method: "GET".into(),
        body: String::new(),
        headers: String::new(),
    };
    let output = run_to_string(&options);

    let last = output.lines().last().unwrap();
    assert!(last.starts_with("Error sending request:"), "got: {last}");
    assert!(!output.contains("Response Body:"));
}
