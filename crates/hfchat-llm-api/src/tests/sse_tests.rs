use pretty_assertions::assert_eq;

use crate::sse::SseDecoder;

#[test]
fn test_single_event() {
    let mut decoder = SseDecoder::new();
    let events = decoder.push(b"data: {\"a\":1}\n\n");
    assert_eq!(events, vec!["{\"a\":1}".to_string()]);
}

#[test]
fn test_event_split_across_reads() {
    let mut decoder = SseDecoder::new();
    assert!(decoder.push(b"data: {\"choices\":").is_empty());
    assert!(decoder.push(b"[]}\n").is_empty());
    assert_eq!(decoder.push(b"\ndata: [DONE]\n\n"), vec!["{\"choices\":[]}".to_string(), "[DONE]".to_string()]);
}

#[test]
fn test_multibyte_character_split_across_reads() {
    let mut decoder = SseDecoder::new();
    let bytes = "data: héllo\n\n".as_bytes();
    // Split inside the two-byte 'é'
    let split = "data: h".len() + 1;
    assert!(decoder.push(&bytes[..split]).is_empty());
    assert_eq!(decoder.push(&bytes[split..]), vec!["héllo".to_string()]);
}

#[test]
fn test_crlf_line_endings() {
    let mut decoder = SseDecoder::new();
    let events = decoder.push(b"data: one\r\n\r\ndata: two\r\n\r\n");
    assert_eq!(events, vec!["one".to_string(), "two".to_string()]);
}

#[test]
fn test_comments_and_other_fields_ignored() {
    let mut decoder = SseDecoder::new();
    let events = decoder.push(b": keep-alive\n\nevent: message\nid: 7\ndata: payload\n\n");
    assert_eq!(events, vec!["payload".to_string()]);
}

#[test]
fn test_multiline_data_joined() {
    let mut decoder = SseDecoder::new();
    let events = decoder.push(b"data: first\ndata: second\n\n");
    assert_eq!(events, vec!["first\nsecond".to_string()]);
}

#[test]
fn test_data_without_space() {
    let mut decoder = SseDecoder::new();
    assert_eq!(decoder.push(b"data:{}\n\n"), vec!["{}".to_string()]);
}

#[test]
fn test_finish_flushes_unterminated_event() {
    let mut decoder = SseDecoder::new();
    assert!(decoder.push(b"data: tail").is_empty());
    assert_eq!(decoder.finish(), Some("tail".to_string()));
    assert_eq!(decoder.finish(), None);
}

#[test]
fn test_finish_flushes_event_missing_blank_line() {
    let mut decoder = SseDecoder::new();
    assert!(decoder.push(b"data: almost\n").is_empty());
    assert_eq!(decoder.finish(), Some("almost".to_string()));
}
