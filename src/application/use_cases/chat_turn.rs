use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::application::{CompletionService, ImageGenerator};
use crate::domain::{
    assemble, build_image_prompt, ChatTurnRequest, ChatTurnResult, CompletionOptions,
    DomainError, FoodIntentClassifier, ImageGenerationOutcome,
};

/// Reply shown to the user when the completion upstream fails.
pub const APOLOGY_REPLY: &str =
    "Sorry, I'm having a little trouble answering right now. Please try again in a moment.";

/// Handles one chat message end to end: completion first, then an optional
/// food illustration.
///
/// Upstream failures never escape [`ChatTurnUseCase::execute`]. A failed
/// completion becomes [`APOLOGY_REPLY`] without images; a failed image call
/// only drops the images.
pub struct ChatTurnUseCase {
    completion_service: Arc<dyn CompletionService>,
    image_generator: Arc<dyn ImageGenerator>,
    classifier: FoodIntentClassifier,
    options: CompletionOptions,
}

impl ChatTurnUseCase {
    pub fn new(
        completion_service: Arc<dyn CompletionService>,
        image_generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            completion_service,
            image_generator,
            classifier: FoodIntentClassifier::new(),
            options: CompletionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate a raw JSON body and run the turn. Only malformed input is an error.
    pub async fn handle(&self, body: &Value) -> Result<ChatTurnResult, DomainError> {
        let request = ChatTurnRequest::from_json(body)?;
        Ok(self.execute(&request).await)
    }

    pub async fn execute(&self, request: &ChatTurnRequest) -> ChatTurnResult {
        let start_time = Instant::now();
        info!(
            "Chat turn: role={} history={} model={}",
            request.role_mode(),
            request.history().len(),
            self.completion_service.model_name()
        );

        let messages = assemble(
            request.role_mode(),
            request.history(),
            request.user_message(),
        );

        let reply = match self
            .completion_service
            .complete(&messages, &self.options)
            .await
        {
            Ok(completion) => completion.into_text(),
            Err(e) => {
                error!("Completion failed, replying with apology: {e}");
                return ChatTurnResult::new(APOLOGY_REPLY);
            }
        };

        let images = match self.illustrate(request.user_message()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Image generation failed, continuing without images: {e}");
                ImageGenerationOutcome::default()
            }
        };

        info!(
            "Chat turn done in {:.2}s ({} images)",
            start_time.elapsed().as_secs_f64(),
            images.urls().len()
        );

        ChatTurnResult::new(reply).with_images(images)
    }

    /// Generate pictures for the dish mentioned in the user's own message.
    async fn illustrate(&self, user_message: &str) -> Result<ImageGenerationOutcome, DomainError> {
        if !self.classifier.detect(user_message) {
            return Ok(ImageGenerationOutcome::default());
        }

        let description = self.classifier.extract(user_message);
        let prompt = build_image_prompt(&description)?;
        debug!("Food detected ({description}), generating image");

        self.image_generator.generate_images(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::domain::{Completion, ConversationMessage, Role};

    struct ScriptedCompletion {
        reply: Option<&'static str>,
        seen: Mutex<Vec<ConversationMessage>>,
    }

    impl ScriptedCompletion {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Some(reply),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete(
            &self,
            messages: &[ConversationMessage],
            _options: &CompletionOptions,
        ) -> Result<Completion, DomainError> {
            *self.seen.lock().unwrap() = messages.to_vec();
            match self.reply {
                Some(reply) => Ok(Completion::new(reply, json!({}))),
                None => Err(DomainError::upstream("API returned 503")),
            }
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    struct CountingImages {
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl CountingImages {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl ImageGenerator for CountingImages {
        async fn generate_images(
            &self,
            prompt: &str,
        ) -> Result<ImageGenerationOutcome, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(DomainError::upstream("image API returned 500"))
            } else {
                Ok(ImageGenerationOutcome::new(vec![
                    "https://img.test/1.png".to_string(),
                    "https://img.test/2.png".to_string(),
                ]))
            }
        }

        fn model_name(&self) -> &str {
            "counting"
        }
    }

    fn use_case(
        completion: Arc<ScriptedCompletion>,
        images: Arc<CountingImages>,
    ) -> ChatTurnUseCase {
        ChatTurnUseCase::new(completion, images)
    }

    #[tokio::test]
    async fn failing_completion_degrades_to_apology() {
        let images = Arc::new(CountingImages::new(false));
        let uc = use_case(Arc::new(ScriptedCompletion::failing()), images.clone());

        let result = uc.execute(&ChatTurnRequest::new("I want to eat pizza")).await;

        assert_eq!(result.reply_text(), APOLOGY_REPLY);
        assert!(result.images().is_empty());
        assert_eq!(images.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failing_images_keep_the_reply() {
        let images = Arc::new(CountingImages::new(true));
        let uc = use_case(
            Arc::new(ScriptedCompletion::replying("Pizza sounds great!")),
            images.clone(),
        );

        let result = uc.execute(&ChatTurnRequest::new("I want to eat pizza")).await;

        assert_eq!(result.reply_text(), "Pizza sounds great!");
        assert!(result.images().is_empty());
        assert_eq!(images.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn non_food_message_never_calls_images() {
        let images = Arc::new(CountingImages::new(false));
        let uc = use_case(Arc::new(ScriptedCompletion::replying("Hi!")), images.clone());

        let result = uc.execute(&ChatTurnRequest::new("Hello, how are you?")).await;

        assert_eq!(result.reply_text(), "Hi!");
        assert!(!result.has_images());
        assert_eq!(images.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn food_message_merges_images_and_uses_extracted_dish() {
        let images = Arc::new(CountingImages::new(false));
        let uc = use_case(
            Arc::new(ScriptedCompletion::replying("Enjoy!")),
            images.clone(),
        );

        let result = uc.execute(&ChatTurnRequest::new("I want to eat 披萨")).await;

        assert_eq!(result.images().len(), 2);
        assert_eq!(result.images()[0], "https://img.test/1.png");
        let prompts = images.prompts.lock().unwrap();
        assert!(prompts[0].contains("food photograph of 披萨."));
    }

    #[tokio::test]
    async fn classifier_looks_at_user_message_not_reply() {
        let images = Arc::new(CountingImages::new(false));
        let uc = use_case(
            Arc::new(ScriptedCompletion::replying("Have some pizza and cake!")),
            images.clone(),
        );

        uc.execute(&ChatTurnRequest::new("Tell me a joke about computers"))
            .await;

        assert_eq!(images.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sends_system_history_and_user_message() {
        let completion = Arc::new(ScriptedCompletion::replying("ok"));
        let uc = use_case(completion.clone(), Arc::new(CountingImages::new(false)));
        let request = ChatTurnRequest::new("and now?")
            .with_history(vec![ConversationMessage::user("hi")]);

        uc.execute(&request).await;

        let seen = completion.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].role(), Role::System);
        assert_eq!(seen[2], ConversationMessage::user("and now?"));
    }

    #[tokio::test]
    async fn handle_rejects_invalid_input_before_upstream() {
        let completion = Arc::new(ScriptedCompletion::replying("ok"));
        let images = Arc::new(CountingImages::new(false));
        let uc = use_case(completion.clone(), images.clone());

        let err = uc.handle(&json!({"role": "nutritionist"})).await.unwrap_err();

        assert!(err.is_invalid_input());
        assert!(completion.seen.lock().unwrap().is_empty());
        assert_eq!(images.calls.load(Ordering::SeqCst), 0);
    }
}
