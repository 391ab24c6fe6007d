//! # Lesson Screen
//!
//! Shows one lesson of a course as an ordered stack of modules:
//!
//! ```text
//! LessonPage
//! ├── title
//! ├── modules: Vec<ModuleView>   // same order as the lesson
//! │   ├── Code(CodeSnippetView)  // language selector + source, copyable
//! │   ├── Image(ImageView)       // caption + async load status
//! │   └── Copy(CopyView)         // markdown body
//! └── next_lesson_slug           // None = "next" control hidden
//! ```

use log::{debug, info, warn};
use ratatui::text::Text;

use crate::content::{
    CodeSnippet, ContentError, Course, ImageInfo, ImageModule, Lesson, LessonModule,
};
use crate::core::language::Language;
use crate::core::route::{Route, ScreenState};
use crate::core::services::{Clipboard, MarkdownRenderer, Navigator, Notifier};

pub const SOURCE_COPIED: &str = "Source code copied to clipboard";

/// Index of the lesson after `index` in a course of `count` lessons.
pub fn next_lesson_index(index: usize, count: usize) -> Option<usize> {
    let next = index + 1;
    (next < count).then_some(next)
}

// ============================================================================
// Module Views
// ============================================================================

/// A code snippet with its language selector.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSnippetView {
    pub title: Option<String>,
    snippet: CodeSnippet,
    language: Language,
}

impl CodeSnippetView {
    pub fn new(snippet: CodeSnippet, language: Language) -> Self {
        Self {
            title: snippet.title.clone(),
            snippet,
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn cycle_language(&mut self, forward: bool) {
        self.language = if forward {
            self.language.next()
        } else {
            self.language.prev()
        };
    }

    /// Source text for the selected language.
    pub fn source(&self) -> &str {
        self.snippet.source(self.language)
    }

    /// Copy `(language, source)` and confirm with a toast.
    pub fn copy_source(&self, clipboard: &mut dyn Clipboard, notifier: &mut dyn Notifier) {
        clipboard.save(self.language.name(), self.source());
        notifier.toast(SOURCE_COPIED);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageStatus {
    Loading,
    Loaded(ImageInfo),
    /// Load failed; a placeholder is shown instead.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageView {
    pub title: Option<String>,
    pub url: String,
    pub caption: Text<'static>,
    pub status: ImageStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CopyView {
    pub title: Option<String>,
    pub body: Text<'static>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleView {
    Code(CodeSnippetView),
    Image(ImageView),
    Copy(CopyView),
}

impl ModuleView {
    fn build(module: LessonModule, markdown: &dyn MarkdownRenderer, language: Language) -> Self {
        match module {
            LessonModule::CodeSnippet(snippet) => {
                ModuleView::Code(CodeSnippetView::new(snippet, language))
            }
            LessonModule::Image(ImageModule {
                title,
                url,
                caption,
            }) => ModuleView::Image(ImageView {
                title,
                url,
                caption: markdown.parse(&caption),
                status: ImageStatus::Loading,
            }),
            LessonModule::Copy(copy) => ModuleView::Copy(CopyView {
                title: copy.title,
                body: markdown.parse(&copy.copy),
            }),
        }
    }
}

/// An image the screen wants loaded, addressed by module position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub module: usize,
    pub url: String,
}

// ============================================================================
// Controller
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LessonPage {
    pub title: Text<'static>,
    /// 1-based position of this lesson in the course.
    pub lesson_number: usize,
    pub lesson_count: usize,
    pub modules: Vec<ModuleView>,
    pub next_lesson_slug: Option<String>,
    /// Index of the focused module.
    pub focused: usize,
}

impl LessonPage {
    pub fn focused_code(&self) -> Option<&CodeSnippetView> {
        match self.modules.get(self.focused) {
            Some(ModuleView::Code(code)) => Some(code),
            _ => None,
        }
    }

    fn focused_code_mut(&mut self) -> Option<&mut CodeSnippetView> {
        match self.modules.get_mut(self.focused) {
            Some(ModuleView::Code(code)) => Some(code),
            _ => None,
        }
    }
}

pub struct LessonController {
    course_slug: String,
    lesson_slug: String,
    state: ScreenState<LessonPage>,
}

impl LessonController {
    pub fn new(course_slug: impl Into<String>, lesson_slug: impl Into<String>) -> Self {
        Self {
            course_slug: course_slug.into(),
            lesson_slug: lesson_slug.into(),
            state: ScreenState::Loading,
        }
    }

    pub fn course_slug(&self) -> &str {
        &self.course_slug
    }

    pub fn lesson_slug(&self) -> &str {
        &self.lesson_slug
    }

    pub fn state(&self) -> &ScreenState<LessonPage> {
        &self.state
    }

    /// Whether the "next" control is shown.
    pub fn has_next(&self) -> bool {
        self.state
            .rendered()
            .is_some_and(|page| page.next_lesson_slug.is_some())
    }

    /// Locate the lesson in the fetched course and build its page, with
    /// snippets opening on `language`. Returns the images that still need loading.
    pub fn on_course_loaded(
        &mut self,
        mut course: Course,
        markdown: &dyn MarkdownRenderer,
        language: Language,
    ) -> Vec<ImageRequest> {
        let Some(index) = course.lesson_index(&self.lesson_slug) else {
            self.on_not_found(&ContentError::NotFound(format!(
                "Lesson \"{}\" in \"{}\"",
                self.lesson_slug, self.course_slug
            )));
            return Vec::new();
        };

        let lesson_count = course.lessons.len();
        let next_lesson_slug =
            next_lesson_index(index, lesson_count).map(|next| course.lessons[next].slug.clone());
        let Lesson { title, modules, .. } = course.lessons.swap_remove(index);

        let modules: Vec<ModuleView> = modules
            .into_iter()
            .map(|module| ModuleView::build(module, markdown, language))
            .collect();

        let images = modules
            .iter()
            .enumerate()
            .filter_map(|(i, module)| match module {
                ModuleView::Image(image) => Some(ImageRequest {
                    module: i,
                    url: image.url.clone(),
                }),
                _ => None,
            })
            .collect();

        info!(
            "Lesson rendered: {}/{} ({} modules, next: {:?})",
            self.course_slug,
            self.lesson_slug,
            modules.len(),
            next_lesson_slug
        );

        self.state = ScreenState::Rendered(LessonPage {
            title: markdown.parse(&title),
            lesson_number: index + 1,
            lesson_count,
            modules,
            next_lesson_slug,
            focused: 0,
        });
        images
    }

    pub fn on_not_found(&mut self, error: &ContentError) {
        info!(
            "Lesson {}/{} unavailable: {}",
            self.course_slug, self.lesson_slug, error
        );
        self.state = ScreenState::NotFound(error.to_string());
    }

    /// Record the outcome of an image load for the module at `module`.
    pub fn on_image_loaded(&mut self, module: usize, result: Result<ImageInfo, ContentError>) {
        let Some(ModuleView::Image(image)) = self
            .state
            .rendered_mut()
            .and_then(|page| page.modules.get_mut(module))
        else {
            debug!("Ignoring image result for module {}", module);
            return;
        };
        image.status = match result {
            Ok(info) => ImageStatus::Loaded(info),
            Err(e) => {
                warn!("Image {} failed to load: {}", image.url, e);
                ImageStatus::Fallback
            }
        };
    }

    /// The "next" control. Does nothing when hidden.
    pub fn next(&self, nav: &mut dyn Navigator) {
        if let Some(slug) = self
            .state
            .rendered()
            .and_then(|page| page.next_lesson_slug.as_deref())
        {
            nav.navigate(Route::lesson(&self.course_slug, slug));
        }
    }

    pub fn focus_next(&mut self) {
        if let Some(page) = self.state.rendered_mut()
            && !page.modules.is_empty()
        {
            page.focused = (page.focused + 1).min(page.modules.len() - 1);
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(page) = self.state.rendered_mut() {
            page.focused = page.focused.saturating_sub(1);
        }
    }

    /// Change the language of the focused code module, if any.
    pub fn cycle_language(&mut self, forward: bool) {
        if let Some(code) = self
            .state
            .rendered_mut()
            .and_then(LessonPage::focused_code_mut)
        {
            code.cycle_language(forward);
        }
    }

    /// Copy the focused code module's source. Returns false when nothing is
    /// copyable.
    pub fn copy_focused(
        &self,
        clipboard: &mut dyn Clipboard,
        notifier: &mut dyn Notifier,
    ) -> bool {
        match self.state.rendered().and_then(LessonPage::focused_code) {
            Some(code) => {
                code.copy_source(clipboard, notifier);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::{ClipboardEntry, Outbox};
    use crate::test_support::{PlainMarkdown, sample_course, sample_snippet, text_of};

    fn loaded(lessons: usize, lesson: &str) -> (LessonController, Vec<ImageRequest>) {
        let mut ctrl = LessonController::new("course", lesson);
        let images = ctrl.on_course_loaded(
            sample_course("course", lessons),
            &PlainMarkdown,
            Language::default(),
        );
        (ctrl, images)
    }

    #[test]
    fn next_index_compares_against_count() {
        assert_eq!(next_lesson_index(0, 3), Some(1));
        assert_eq!(next_lesson_index(1, 3), Some(2));
        assert_eq!(next_lesson_index(2, 3), None);
        assert_eq!(next_lesson_index(0, 1), None);
    }

    #[test]
    fn modules_render_in_lesson_order() {
        let (ctrl, _) = loaded(2, "lesson-0");
        let page = ctrl.state().rendered().unwrap();
        let kinds: Vec<&str> = page
            .modules
            .iter()
            .map(|m| match m {
                ModuleView::Code(_) => "code",
                ModuleView::Image(_) => "image",
                ModuleView::Copy(_) => "copy",
            })
            .collect();
        assert_eq!(kinds, vec!["copy", "code", "image"]);
        assert_eq!(text_of(&page.title), "Lesson title 0");
        assert_eq!(page.lesson_number, 1);
        assert_eq!(page.lesson_count, 2);
    }

    #[test]
    fn image_requests_point_at_image_modules() {
        let (_, images) = loaded(1, "lesson-0");
        assert_eq!(
            images,
            vec![ImageRequest {
                module: 2,
                url: "https://example.com/lesson-0.png".to_string()
            }]
        );
    }

    #[test]
    fn next_present_for_every_lesson_but_the_last() {
        for i in 0..3 {
            let (ctrl, _) = loaded(3, &format!("lesson-{i}"));
            let mut outbox = Outbox::new();
            ctrl.next(&mut outbox);
            if i < 2 {
                assert!(ctrl.has_next(), "lesson {i} should have next");
                assert_eq!(
                    outbox.routes,
                    vec![Route::lesson("course", format!("lesson-{}", i + 1))]
                );
            } else {
                assert!(!ctrl.has_next());
                assert!(outbox.routes.is_empty());
            }
        }
    }

    #[test]
    fn second_to_last_lesson_has_next() {
        let (ctrl, _) = loaded(2, "lesson-0");
        assert!(ctrl.has_next());
    }

    #[test]
    fn unknown_lesson_is_not_found() {
        let (ctrl, images) = loaded(2, "nope");
        assert!(images.is_empty());
        assert_eq!(
            ctrl.state(),
            &ScreenState::NotFound("Lesson \"nope\" in \"course\" not found.".to_string())
        );
        assert!(!ctrl.has_next());
    }

    #[test]
    fn failed_fetch_is_not_found() {
        let mut ctrl = LessonController::new("course", "lesson-0");
        ctrl.on_not_found(&ContentError::Network("connection refused".to_string()));
        assert!(matches!(ctrl.state(), ScreenState::NotFound(msg) if msg.contains("refused")));
    }

    #[test]
    fn code_snippet_defaults_to_java_android() {
        let view = CodeSnippetView::new(sample_snippet(), Language::default());
        assert_eq!(view.language(), Language::JavaAndroid);
        assert_eq!(view.source(), "android()");
    }

    #[test]
    fn cycling_language_shows_its_source() {
        let mut view = CodeSnippetView::new(sample_snippet(), Language::Python);
        assert_eq!(view.source(), "python()");
        view.cycle_language(true);
        assert_eq!(view.source(), "ruby()");
        view.cycle_language(false);
        view.cycle_language(false);
        assert_eq!(view.source(), "php()");
    }

    #[test]
    fn snippets_open_on_the_given_language() {
        let mut ctrl = LessonController::new("course", "lesson-0");
        ctrl.on_course_loaded(sample_course("course", 1), &PlainMarkdown, Language::Ruby);
        let page = ctrl.state().rendered().unwrap();
        match &page.modules[1] {
            ModuleView::Code(code) => {
                assert_eq!(code.language(), Language::Ruby);
                assert_eq!(code.source(), "ruby()");
            }
            other => panic!("expected code module, got {:?}", other),
        }
    }

    #[test]
    fn copying_source_saves_language_and_text_and_toasts() {
        let view = CodeSnippetView::new(sample_snippet(), Language::Curl);

        let mut clipboard = Outbox::new();
        let mut notifier = Outbox::new();
        view.copy_source(&mut clipboard, &mut notifier);
        assert_eq!(
            clipboard.clipboard,
            vec![ClipboardEntry {
                label: "curl".to_string(),
                text: "curl()".to_string()
            }]
        );
        assert_eq!(notifier.toasts, vec![SOURCE_COPIED.to_string()]);
    }

    #[test]
    fn cycling_changes_focused_code_module_only() {
        let (mut ctrl, _) = loaded(1, "lesson-0");
        // Focus is on the copy module: nothing to cycle or copy
        ctrl.cycle_language(true);
        let mut outbox = Outbox::new();
        assert!(!ctrl.copy_focused(&mut Outbox::new(), &mut outbox));
        assert!(outbox.is_empty());

        ctrl.focus_next();
        ctrl.cycle_language(true);
        let page = ctrl.state().rendered().unwrap();
        let code = page.focused_code().unwrap();
        assert_eq!(code.language(), Language::Php);
        assert_eq!(code.source(), "php()");

        let mut clipboard = Outbox::new();
        let mut notifier = Outbox::new();
        assert!(ctrl.copy_focused(&mut clipboard, &mut notifier));
        assert_eq!(clipboard.clipboard[0].label, "php");
        assert_eq!(notifier.toasts.len(), 1);
    }

    #[test]
    fn focus_is_clamped() {
        let (mut ctrl, _) = loaded(1, "lesson-0");
        ctrl.focus_prev();
        for _ in 0..10 {
            ctrl.focus_next();
        }
        assert_eq!(ctrl.state().rendered().unwrap().focused, 2);
    }

    #[test]
    fn image_results_update_status() {
        let (mut ctrl, _) = loaded(1, "lesson-0");
        ctrl.on_image_loaded(
            2,
            Ok(ImageInfo {
                url: "https://example.com/lesson-0.png".to_string(),
                content_type: Some("image/png".to_string()),
                bytes: 42,
            }),
        );
        let status = |ctrl: &LessonController| match &ctrl.state().rendered().unwrap().modules[2] {
            ModuleView::Image(img) => img.status.clone(),
            other => panic!("expected image, got {:?}", other),
        };
        assert!(matches!(status(&ctrl), ImageStatus::Loaded(info) if info.bytes == 42));

        ctrl.on_image_loaded(2, Err(ContentError::Api { status: 404, message: "gone".into() }));
        assert_eq!(status(&ctrl), ImageStatus::Fallback);
    }

    #[test]
    fn image_result_for_non_image_module_is_ignored() {
        let (mut ctrl, _) = loaded(1, "lesson-0");
        let before = ctrl.state().clone();
        ctrl.on_image_loaded(0, Err(ContentError::Network("x".into())));
        ctrl.on_image_loaded(99, Err(ContentError::Network("x".into())));
        assert_eq!(ctrl.state(), &before);
    }
}
