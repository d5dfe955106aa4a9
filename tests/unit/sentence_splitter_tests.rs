/*!
 * Tests for sentence splitting
 */

use slideline::sentence_splitter::split_sentences;

#[test]
fn test_split_sentences_withTwoSentences_shouldSplitAfterEachMark() {
    assert_eq!(split_sentences("你好。世界！"), vec!["你好。", "世界！"]);
}

#[test]
fn test_split_sentences_withEmptyText_shouldReturnNothing() {
    assert!(split_sentences("").is_empty());
    assert!(split_sentences("   \n\t").is_empty());
}

#[test]
fn test_split_sentences_withoutTerminalMark_shouldReturnTrimmedTextUnchanged() {
    assert_eq!(split_sentences("测试"), vec!["测试"]);
    assert_eq!(split_sentences("  没有标点的句子  "), vec!["没有标点的句子"]);
    assert_eq!(split_sentences("ASCII marks. Do not count!"), vec!["ASCII marks. Do not count!"]);
}

#[test]
fn test_split_sentences_withTrailingFragment_shouldAppendFullStop() {
    assert_eq!(split_sentences("你好。测试"), vec!["你好。", "测试。"]);
}

#[test]
fn test_split_sentences_withConsecutiveMarks_shouldKeepThemTogether() {
    assert_eq!(split_sentences("真的吗？！是的。"), vec!["真的吗？！", "是的。"]);
    assert_eq!(split_sentences("什么？？？"), vec!["什么？？？"]);
}

#[test]
fn test_split_sentences_withWhitespaceBetweenSentences_shouldTrimFragments() {
    assert_eq!(
        split_sentences("  第一句。  第二句？ 第三句！  "),
        vec!["第一句。", "第二句？", "第三句！"]
    );
}

#[test]
fn test_split_sentences_withLoneMarks_shouldKeepMarkAsSentence() {
    assert_eq!(split_sentences("。"), vec!["。"]);
    assert_eq!(split_sentences("好。 。"), vec!["好。", "。"]);
}

#[test]
fn test_split_sentences_withMixedScript_shouldSplitOnlyOnFullWidthMarks() {
    assert_eq!(
        split_sentences("Rust 很快。It is safe! 对吧？"),
        vec!["Rust 很快。", "It is safe! 对吧？"]
    );
}

#[test]
fn test_split_sentences_concatenation_shouldReconstructNormalizedText() {
    let text = "一。二！三？";
    assert_eq!(split_sentences(text).concat(), text);
}

#[test]
fn test_split_sentences_everySentence_shouldEndWithTerminalMark() {
    let sentences = split_sentences("春天来了 花开了。夏天 来了吗？秋天");
    assert_eq!(sentences.len(), 3);
    for sentence in &sentences {
        assert!(
            sentence.ends_with(['。', '！', '？']),
            "sentence without terminal mark: {}",
            sentence
        );
    }
}

#[test]
fn test_split_sentences_calledTwice_shouldBeDeterministic() {
    let text = "一。二！三";
    assert_eq!(split_sentences(text), split_sentences(text));
}
