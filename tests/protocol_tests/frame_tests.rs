//! Protocol Tests
//!
//! Tests for frame reading, command parsing and encoding.

use std::io::Cursor;

use msgboard::protocol::{
    encode_frame, encode_response, write_frame, write_response, Command, CommandType, Frame,
    FrameReader, FrameSource, Response,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn reader(input: &str) -> FrameReader<Cursor<Vec<u8>>> {
    FrameReader::new(Cursor::new(input.as_bytes().to_vec()))
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Frame Reader Tests
// =============================================================================

#[test]
fn test_read_simple_frame() {
    let mut r = reader("GET\n");

    assert_eq!(r.read_frame().unwrap(), Some(Frame::simple("GET")));
    assert_eq!(r.read_frame().unwrap(), None);
}

#[test]
fn test_read_block_frame() {
    let mut r = reader("POST\nhello\nworld\n#\n");

    let frame = r.read_frame().unwrap().unwrap();
    assert_eq!(frame.command, "POST");
    assert_eq!(frame.body, lines(&["hello", "world"]));
    assert_eq!(r.read_frame().unwrap(), None);
}

#[test]
fn test_read_block_frame_empty_body() {
    let mut r = reader("DELETE\n#\n");

    let frame = r.read_frame().unwrap().unwrap();
    assert!(frame.body.is_empty());
}

#[test]
fn test_terminator_matched_after_trim() {
    let mut r = reader("POST\nbody\n  #  \nGET\n");

    assert_eq!(r.read_frame().unwrap().unwrap().body, lines(&["body"]));
    assert_eq!(r.read_frame().unwrap(), Some(Frame::simple("GET")));
}

#[test]
fn test_body_lines_keep_whitespace() {
    let mut r = reader("POST\n  indented  \n\n#\n");

    assert_eq!(r.read_frame().unwrap().unwrap().body, lines(&["  indented  ", ""]));
}

#[test]
fn test_crlf_line_endings() {
    let mut r = reader("post\r\nhi\r\n#\r\nquit\r\n");

    let frame = r.read_frame().unwrap().unwrap();
    assert_eq!(frame.command, "post");
    assert_eq!(frame.body, lines(&["hi"]));
    assert_eq!(r.read_frame().unwrap(), Some(Frame::simple("quit")));
}

#[test]
fn test_lowercase_keyword_still_reads_block() {
    let mut r = reader("Delete\n0001\n#\n");

    let frame = r.read_frame().unwrap().unwrap();
    assert_eq!(frame.keyword(), "DELETE");
    assert_eq!(frame.body, lines(&["0001"]));
}

#[test]
fn test_unknown_keyword_has_no_body() {
    let mut r = reader("HELLO\nPOST\n#\n");

    assert_eq!(r.read_frame().unwrap(), Some(Frame::simple("HELLO")));
    assert_eq!(r.read_frame().unwrap().unwrap().command, "POST");
}

#[test]
fn test_get_does_not_consume_body() {
    let mut r = reader("GET\n#\n");

    assert_eq!(r.read_frame().unwrap(), Some(Frame::simple("GET")));
    assert_eq!(r.read_frame().unwrap(), Some(Frame::simple("#")));
}

#[test]
fn test_empty_line_is_a_frame_not_eof() {
    let mut r = reader("\nGET\n");

    assert_eq!(r.read_frame().unwrap(), Some(Frame::simple("")));
    assert_eq!(r.read_frame().unwrap(), Some(Frame::simple("GET")));
}

#[test]
fn test_empty_stream_is_end_of_stream() {
    let mut r = reader("");
    assert_eq!(r.read_frame().unwrap(), None);
}

#[test]
fn test_eof_inside_block_is_end_of_stream() {
    let mut r = reader("POST\npartial\n");
    assert_eq!(r.read_frame().unwrap(), None);
}

#[test]
fn test_last_line_without_newline() {
    let mut r = reader("QUIT");
    assert_eq!(r.read_frame().unwrap(), Some(Frame::simple("QUIT")));
}

#[test]
fn test_invalid_utf8_does_not_error() {
    let mut r = FrameReader::new(Cursor::new(vec![0xFF, 0xFE, b'\n']));

    let frame = r.read_frame().unwrap().unwrap();
    assert_eq!(Command::from_frame(frame).command_type(), CommandType::Unknown);
}

// =============================================================================
// Command Parsing Tests
// =============================================================================

#[test]
fn test_keyword_case_insensitive() {
    for keyword in ["post", "Post", "POST", "pOsT"] {
        assert_eq!(CommandType::from_keyword(keyword), CommandType::Post);
    }
    assert_eq!(CommandType::from_keyword("get"), CommandType::Get);
    assert_eq!(CommandType::from_keyword("Quit"), CommandType::Quit);
    assert_eq!(CommandType::from_keyword("delete"), CommandType::Delete);
    assert_eq!(CommandType::from_keyword("LIST"), CommandType::Unknown);
}

#[test]
fn test_post_content_joined() {
    let cmd = Command::from_frame(Frame::new("POST", lines(&["hello", "world"])));
    assert_eq!(
        cmd,
        Command::Post {
            content: "hello\nworld".to_string()
        }
    );
}

#[test]
fn test_post_empty_body_is_empty_content() {
    let cmd = Command::from_frame(Frame::simple("post"));
    assert_eq!(cmd, Command::Post { content: String::new() });
}

#[test]
fn test_delete_ids_trimmed_blank_kept() {
    let cmd = Command::from_frame(Frame::new("DELETE", lines(&[" 0001 ", "", "\t0002"])));
    assert_eq!(
        cmd,
        Command::Delete {
            ids: lines(&["0001", "", "0002"])
        }
    );
}

#[test]
fn test_unknown_keeps_keyword() {
    let cmd = Command::from_frame(Frame::simple("list"));
    assert_eq!(
        cmd,
        Command::Unknown {
            keyword: "list".to_string()
        }
    );
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_block_frame() {
    assert_eq!(encode_frame("post", &["hello", "world"]), "POST\nhello\nworld\n#\n");
    assert_eq!(encode_frame::<&str>("DELETE", &[]), "DELETE\n#\n");
}

#[test]
fn test_encode_simple_frame_ignores_body() {
    assert_eq!(encode_frame::<&str>("get", &[]), "GET\n");
    assert_eq!(encode_frame("QUIT", &["ignored"]), "QUIT\n");
    assert_eq!(encode_frame::<&str>("hello", &[]), "HELLO\n");
}

#[test]
fn test_written_frame_reads_back() {
    let mut buf = Vec::new();
    write_frame(&mut buf, "DELETE", &["0000", "0003"]).unwrap();
    write_frame::<_, &str>(&mut buf, "QUIT", &[]).unwrap();

    let mut r = FrameReader::new(Cursor::new(buf));
    assert_eq!(
        r.read_frame().unwrap(),
        Some(Frame::new("DELETE", lines(&["0000", "0003"])))
    );
    assert_eq!(r.read_frame().unwrap(), Some(Frame::simple("QUIT")));
}

#[test]
fn test_response_texts() {
    assert_eq!(Response::Ok.to_string(), "OK");
    assert_eq!(Response::WrongId.to_string(), "ERROR - Wrong ID");
    assert_eq!(Response::NotUnderstood.to_string(), "ERROR - Command not understood");
    assert_eq!(Response::Listing("x\ny".into()).as_str(), "x\ny");
}

#[test]
fn test_response_newline_terminated() {
    assert_eq!(encode_response(&Response::Ok), b"OK\n");

    let mut buf = Vec::new();
    write_response(&mut buf, &Response::NotUnderstood).unwrap();
    assert_eq!(buf, b"ERROR - Command not understood\n");
}
