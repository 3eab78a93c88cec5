//! Reduce fetched comments into a bounded completion prompt.

/// Instruction prefix placed before every comment excerpt.
pub const INSTRUCTION_TEMPLATE: &str = "Analyze the following Reddit comments written by a \
single user. Describe the author's interests, personality traits, and recurring topics in a \
short, friendly profile of a few sentences. Do not quote the comments verbatim.\n\nComments:\n";

/// Default ceiling for the comment excerpt, in characters.
pub const DEFAULT_PROMPT_MAX_CHARS: usize = 4000;

/// Separator placed between consecutive comment bodies.
const COMMENT_SEPARATOR: &str = " ";

/// Maximum number of characters of comment text sent to the completion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBudget {
    max_chars: usize,
}

impl PromptBudget {
    /// Build a budget; zero is rejected because it would always send an
    /// empty excerpt.
    ///
    /// # Examples
    /// ```
    /// use profile_backend::domain::PromptBudget;
    ///
    /// assert!(PromptBudget::new(0).is_none());
    /// assert_eq!(PromptBudget::new(10).map(|b| b.max_chars()), Some(10));
    /// ```
    pub fn new(max_chars: usize) -> Option<Self> {
        (max_chars > 0).then_some(Self { max_chars })
    }

    /// Ceiling in characters.
    pub fn max_chars(self) -> usize {
        self.max_chars
    }
}

impl Default for PromptBudget {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_PROMPT_MAX_CHARS,
        }
    }
}

/// Prompt derived from a comment set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText {
    excerpt: String,
    rendered: String,
}

impl PromptText {
    /// Bounded comment excerpt without the instruction prefix.
    pub fn excerpt(&self) -> &str {
        self.excerpt.as_str()
    }

    /// Full prompt: instruction prefix followed by the excerpt.
    pub fn as_str(&self) -> &str {
        self.rendered.as_str()
    }
}

/// Join comments in order and keep the leading `budget` characters.
///
/// Truncation counts Unicode scalar values, so multi-byte text is never split
/// mid-character.
///
/// # Examples
/// ```
/// use profile_backend::domain::{PromptBudget, reduce_comments};
/// use profile_backend::domain::prompt::INSTRUCTION_TEMPLATE;
///
/// let comments = vec!["hello".to_owned(), "world".to_owned()];
/// let budget = PromptBudget::new(8).expect("non-zero");
/// let prompt = reduce_comments(&comments, budget);
/// assert_eq!(prompt.excerpt(), "hello wo");
/// assert!(prompt.as_str().starts_with(INSTRUCTION_TEMPLATE));
/// ```
pub fn reduce_comments(comments: &[String], budget: PromptBudget) -> PromptText {
    let excerpt: String = comments
        .join(COMMENT_SEPARATOR)
        .chars()
        .take(budget.max_chars())
        .collect();
    let rendered = format!("{INSTRUCTION_TEMPLATE}{excerpt}");
    PromptText { excerpt, rendered }
}
