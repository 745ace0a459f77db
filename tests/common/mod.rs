use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build an SSE body from raw `data:` payloads
#[allow(dead_code)]
pub fn sse_body(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|payload| format!("data: {}\n\n", payload))
        .collect()
}

/// A chat-completion chunk carrying one content delta
#[allow(dead_code)]
pub fn content_chunk(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "model": "llama-3.3-70b-versatile",
        "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": null}]
    })
    .to_string()
}

/// The final chunk with a finish reason and no content
#[allow(dead_code)]
pub fn finish_chunk() -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "model": "llama-3.3-70b-versatile",
        "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]
    })
    .to_string()
}

/// A complete streamed reply made of `fragments`, ending with `[DONE]`
#[allow(dead_code)]
pub fn streamed_reply(fragments: &[&str]) -> String {
    let mut payloads: Vec<String> = fragments.iter().map(|f| content_chunk(f)).collect();
    payloads.push(finish_chunk());
    payloads.push("[DONE]".to_string());
    let refs: Vec<&str> = payloads.iter().map(String::as_str).collect();
    sse_body(&refs)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
