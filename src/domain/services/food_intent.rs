use std::sync::LazyLock;

use regex::Regex;

/// Food vocabulary matched by case-folded substring containment.
///
/// Matching is deliberately not tokenized, so a keyword also fires inside a
/// longer word ("ricecooker" contains "rice", "weather" contains "eat").
const FOOD_KEYWORDS: &[&str] = &[
    // staples
    "饭", "米饭", "面条", "面包", "饺子", "包子", "馒头", "粥", "披萨", "汉堡", "寿司", "火锅",
    "rice", "noodle", "pasta", "bread", "pizza", "burger", "sandwich", "sushi", "dumpling", "taco",
    // meat and seafood
    "肉", "牛排", "鸡", "鸭", "猪", "鱼", "虾", "蟹", "蛋",
    "steak", "chicken", "beef", "pork", "bacon", "fish", "salmon", "shrimp", "egg",
    // vegetables
    "蔬菜", "青菜", "西兰花", "番茄", "西红柿", "土豆", "胡萝卜", "沙拉",
    "vegetable", "broccoli", "tomato", "potato", "carrot", "salad", "spinach",
    // fruit
    "水果", "苹果", "香蕉", "草莓", "西瓜", "葡萄", "芒果",
    "fruit", "apple", "banana", "strawberr", "watermelon", "grape", "mango",
    // snacks and desserts
    "零食", "蛋糕", "甜点", "饼干", "巧克力", "冰淇淋", "薯片",
    "snack", "cake", "dessert", "cookie", "chocolate", "ice cream", "chips",
    // drinks
    "奶茶", "咖啡", "果汁", "牛奶", "茶",
    "coffee", "tea", "juice", "milk", "smoothie",
    // cooking
    "烤", "炒", "煮", "蒸", "炸", "炖", "菜谱", "食谱",
    "recipe", "cook", "bake", "grill", "fried", "roast",
    // eating in general
    "吃", "喝", "早餐", "午餐", "晚餐", "夜宵", "美食", "好吃", "饿",
    "food", "eat", "ate", "meal", "breakfast", "lunch", "dinner", "hungry", "delicious", "tasty",
    "yummy",
];

/// Characters a captured dish name never crosses.
const CLAUSE: &str = r"[^,.!?;:，。！？；：\n]";

/// One extraction rule: a pattern and the capture group holding the dish.
#[derive(Debug)]
pub struct ExtractionRule {
    name: &'static str,
    pattern: Regex,
    capture: usize,
}

impl ExtractionRule {
    fn new(name: &'static str, pattern: &str, capture: usize) -> Self {
        let pattern = pattern.replace("{CLAUSE}", CLAUSE);
        Self {
            name,
            pattern: Regex::new(&pattern).expect("extraction rule patterns are valid"),
            capture,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Trimmed capture of this rule, or `None` when it does not match or
    /// captures only whitespace.
    pub fn apply(&self, text: &str) -> Option<String> {
        let captured = self.pattern.captures(text)?.get(self.capture)?;
        let trimmed = captured.as_str().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Ordered rule list; the first rule yielding a capture wins.
static EXTRACTION_RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    vec![
        ExtractionRule::new(
            "want_to_eat",
            r"(?i)\bwants? to (?:eat|have|try)\s+({CLAUSE}+)",
            1,
        ),
        ExtractionRule::new("xiang_chi", r"(?:想吃|要吃|好想吃)({CLAUSE}+)", 1),
        ExtractionRule::new("craving", r"(?i)\bcraving\s+(?:for\s+|some\s+)?({CLAUSE}+)", 1),
        ExtractionRule::new("ate", r"(?i)\b(?:ate|eating|had)\s+({CLAUSE}+)", 1),
        ExtractionRule::new("chi_le", r"(?:吃了|在吃|吃过)({CLAUSE}+)", 1),
        ExtractionRule::new(
            "recipe_for",
            r"(?i)\b(?:recipe (?:for|of)|how (?:to|do i|do you) (?:cook|make|bake))\s+({CLAUSE}+)",
            1,
        ),
        ExtractionRule::new("zen_me_zuo", r"({CLAUSE}+?)(?:怎么做|的做法)", 1),
        ExtractionRule::new(
            "is_tasty",
            r"(?i)({CLAUSE}+?)\s+(?:is|are|was|were|looks|tastes)\s+(?:so\s+|very\s+|really\s+)?(?:tasty|delicious|yummy)",
            1,
        ),
        ExtractionRule::new("hao_chi", r"({CLAUSE}+?)(?:真|很|太|超|好)?好吃", 1),
    ]
});

/// Heuristic classifier that decides whether a message is about food and
/// pulls a short dish description out of it for image generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoodIntentClassifier;

impl FoodIntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        FOOD_KEYWORDS
    }

    pub fn rules(&self) -> &'static [ExtractionRule] {
        &EXTRACTION_RULES
    }

    pub fn detect(&self, text: &str) -> bool {
        let folded = text.to_lowercase();
        FOOD_KEYWORDS.iter().any(|keyword| folded.contains(keyword))
    }

    /// Dish description for `text`, or an empty string when it is not about food.
    ///
    /// Falls back to the whole input when no rule captures anything.
    pub fn extract(&self, text: &str) -> String {
        if !self.detect(text) {
            return String::new();
        }

        self.rules()
            .iter()
            .find_map(|rule| rule.apply(text))
            .unwrap_or_else(|| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static ExtractionRule {
        FoodIntentClassifier::new()
            .rules()
            .iter()
            .find(|r| r.name() == name)
            .unwrap()
    }

    #[test]
    fn no_keyword_means_no_detection_and_no_extraction() {
        let classifier = FoodIntentClassifier::new();
        for text in ["Hello, how are you?", "Tell me a joke about computers", "我今天很累"] {
            assert!(!classifier.detect(text), "unexpected detection in {text:?}");
            assert_eq!(classifier.extract(text), "");
        }
    }

    #[test]
    fn want_to_eat_mixed_language() {
        let classifier = FoodIntentClassifier::new();
        assert!(classifier.detect("I want to eat 披萨"));
        assert_eq!(classifier.extract("I want to eat 披萨"), "披萨");
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert!(FoodIntentClassifier::new().detect("PIZZA night!"));
    }

    #[test]
    fn substring_matching_has_false_positives() {
        let classifier = FoodIntentClassifier::new();
        assert!(classifier.detect("my ricecooker broke"));
        assert!(classifier.detect("the weather is nice"));
    }

    #[test]
    fn falls_back_to_whole_text() {
        let classifier = FoodIntentClassifier::new();
        assert_eq!(classifier.extract("Pizza!"), "Pizza!");
    }

    #[test]
    fn earlier_rule_wins() {
        // Both "ate" and "is_tasty" match; "ate" comes first.
        let text = "I ate sushi, it was delicious";
        assert_eq!(FoodIntentClassifier::new().extract(text), "sushi");
        assert_eq!(rule("is_tasty").apply(text).as_deref(), Some("it"));
    }

    #[test]
    fn want_to_eat_rule() {
        assert_eq!(
            rule("want_to_eat").apply("I really want to try spicy ramen tonight").as_deref(),
            Some("spicy ramen tonight")
        );
    }

    #[test]
    fn xiang_chi_rule() {
        assert_eq!(rule("xiang_chi").apply("我好想吃火锅！").as_deref(), Some("火锅"));
    }

    #[test]
    fn craving_rule() {
        assert_eq!(
            rule("craving").apply("I'm craving some tacos.").as_deref(),
            Some("tacos")
        );
    }

    #[test]
    fn ate_rule() {
        assert_eq!(
            rule("ate").apply("Yesterday I ate grilled salmon").as_deref(),
            Some("grilled salmon")
        );
    }

    #[test]
    fn chi_le_rule() {
        assert_eq!(rule("chi_le").apply("今天中午吃了牛肉面。").as_deref(), Some("牛肉面"));
    }

    #[test]
    fn recipe_for_rule() {
        assert_eq!(
            rule("recipe_for").apply("Do you have a recipe for banana bread?").as_deref(),
            Some("banana bread")
        );
        assert_eq!(
            rule("recipe_for").apply("how to bake sourdough").as_deref(),
            Some("sourdough")
        );
    }

    #[test]
    fn zen_me_zuo_rule() {
        assert_eq!(rule("zen_me_zuo").apply("红烧肉怎么做？").as_deref(), Some("红烧肉"));
    }

    #[test]
    fn is_tasty_rule() {
        assert_eq!(
            rule("is_tasty").apply("This mango sticky rice is so delicious").as_deref(),
            Some("This mango sticky rice")
        );
    }

    #[test]
    fn hao_chi_rule() {
        assert_eq!(rule("hao_chi").apply("这个蛋糕真好吃").as_deref(), Some("这个蛋糕"));
    }

    #[test]
    fn whitespace_capture_does_not_win() {
        let classifier = FoodIntentClassifier::new();
        assert_eq!(rule("want_to_eat").apply("I want to eat   ."), None);
        assert_eq!(classifier.extract("I want to eat   ."), "I want to eat   .");
    }
}
