use regex::Regex;
use std::sync::OnceLock;

fn paragraph_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\n+").expect("paragraph regex"))
}

/// Splits source text into chunks of at most `max_chunk_size` characters
/// without ever cutting a paragraph in half.
///
/// Chunk boundaries fall only on blank-line runs. A single paragraph longer
/// than the limit becomes its own oversized chunk. Text that already fits is
/// returned as a one-element vector, unmodified.
pub fn split_text(text: &str, max_chunk_size: usize) -> Vec<String> {
    if text.len() <= max_chunk_size {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for paragraph in paragraph_breaks().split(text) {
        // +2 accounts for the "\n\n" joiner.
        if !current.is_empty() && current.len() + 2 + paragraph.len() > max_chunk_size {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(paragraph);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    if chunks.is_empty() {
        vec![text.to_string()]
    } else {
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_untouched_chunk() {
        let text = "Primer párrafo.\n\nSegundo párrafo.";
        let chunks = split_text(text, 3000);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn boundaries_respect_paragraphs() {
        let p1 = "a".repeat(40);
        let p2 = "b".repeat(40);
        let p3 = "c".repeat(40);
        let text = format!("{}\n\n{}\n\n{}", p1, p2, p3);

        let chunks = split_text(&text, 90);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{}\n\n{}", p1, p2));
        assert_eq!(chunks[1], p3);
        for c in &chunks {
            assert!(c.len() <= 90);
        }
    }

    #[test]
    fn paragraph_sequence_is_reconstructible() {
        let paragraphs: Vec<String> = (0..12)
            .map(|i| format!("Párrafo número {} con algo de relleno textual.", i))
            .collect();
        let text = paragraphs.join("\n\n");

        let chunks = split_text(&text, 120);
        let rejoined: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.split("\n\n"))
            .collect();
        assert_eq!(rejoined, paragraphs.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn oversized_paragraph_is_kept_whole() {
        let huge = "x".repeat(500);
        let text = format!("corto\n\n{}\n\ncola", huge);

        let chunks = split_text(&text, 100);
        assert!(chunks.contains(&huge));
    }

    #[test]
    fn multiple_blank_lines_count_as_one_break() {
        let text = format!("{}\n\n\n\n{}", "a".repeat(60), "b".repeat(60));
        let chunks = split_text(&text, 70);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "a".repeat(60));
        assert_eq!(chunks[1], "b".repeat(60));
    }
}
