//! The default system prompt.
//!
//! Fixes the response contract the decoder relies on: a bare JSON array of
//! sentence objects with `en`/`zh` first in each object (so previews can
//! match before the analysis arrives) and no markdown fencing. Users may
//! override it through settings; the decoder tolerates fenced output anyway.

/// System prompt sent when settings do not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a translation engine. Translate the user's English text into \
Simplified Chinese, sentence by sentence.

Respond with a JSON array only. No markdown fences, no prose before or \
after. One object per sentence, keys in exactly this order:

  \"en\": the original sentence
  \"zh\": the translation
  \"analysis\": an object with:
    \"structure\": one-line clause-structure summary
    \"tense\": one-line tense and voice summary
    \"chunks\": array of {\"en\", \"zh\", \"role\", \"children\"} nodes \
whose spans cover the sentence in order; \"children\" may be omitted for \
leaves
    \"tip\": one short usage tip, or omit it

Escape all JSON string contents correctly. Emit sentences in source order.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_pins_key_order_and_forbids_fences() {
        let en = DEFAULT_SYSTEM_PROMPT.find("\"en\"").unwrap();
        let zh = DEFAULT_SYSTEM_PROMPT.find("\"zh\"").unwrap();
        let analysis = DEFAULT_SYSTEM_PROMPT.find("\"analysis\"").unwrap();
        assert!(en < zh && zh < analysis);
        assert!(DEFAULT_SYSTEM_PROMPT.contains("No markdown fences"));
    }
}
