//! # Image Decoration
//!
//! Reconciles border-radius classes on every image beneath a DOM root against
//! the registry's current selection. Decoration is idempotent: the observation
//! adapters may hand overlapping regions to [`ImageDecorator::decorate`] and
//! repeated passes converge on the same class set.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::{
    dom::{Element, ElementRef},
    styles::StyleRegistry,
};

/// Class marking a host wrapper container for a locally attached image
const IMAGE_EMBED_CLASS: &str = "image-embed";

/// Applies the selected border-radius class to images in a DOM region
///
/// The registry is shared with the settings-panel path, which may change the
/// selection between passes; the decorator only ever reads it.
pub struct ImageDecorator {
    registry: Rc<RefCell<StyleRegistry>>,
}

impl ImageDecorator {
    pub fn new(registry: Rc<RefCell<StyleRegistry>>) -> Self {
        Self { registry }
    }

    /// Ensure every image beneath `root` (inclusive) carries exactly one
    /// border-radius class, matching the current selection.
    ///
    /// Targets are bare `<img>` elements plus the first child of each
    /// `image-embed` wrapper when that child is an image. Wrappers with no
    /// children or a non-image first child are skipped. Returns the number of
    /// images reconciled.
    pub fn decorate(&self, root: &ElementRef) -> usize {
        let registry = self.registry.borrow();
        let selected = registry.selected_class();

        let targets = collect_images(root);
        for image in &targets {
            for class in registry.all_classes() {
                if class != selected {
                    image.remove_class(class);
                }
            }
            image.add_class(selected);
        }

        if !targets.is_empty() {
            debug!("Decorated {} image(s) with '{}'", targets.len(), selected);
        }
        targets.len()
    }
}

/// Collect decoration targets beneath `root`, deduplicated by identity.
///
/// An image inside an `image-embed` wrapper is reachable both as a descendant
/// and through the wrapper; it is reported once.
fn collect_images(root: &ElementRef) -> Vec<ElementRef> {
    let mut targets: Vec<ElementRef> = Vec::new();
    let mut push = |el: ElementRef| {
        if !targets.iter().any(|t| Rc::ptr_eq(t, &el)) {
            targets.push(el);
        }
    };

    for el in Element::subtree(root) {
        if el.tag() == "img" {
            push(el);
        } else if el.has_class(IMAGE_EMBED_CLASS) {
            if let Some(first) = el.first_element_child() {
                if first.tag() == "img" {
                    push(first);
                }
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::settings::ImageStyleSettings;

    fn decorator() -> ImageDecorator {
        ImageDecorator::new(Rc::new(RefCell::new(StyleRegistry::default())))
    }

    fn decorator_with(selected: &str) -> (ImageDecorator, Rc<RefCell<StyleRegistry>>) {
        let registry = Rc::new(RefCell::new(StyleRegistry::default()));
        registry.borrow_mut().set_selected(selected).unwrap();
        (ImageDecorator::new(Rc::clone(&registry)), registry)
    }

    #[test]
    fn test_bare_image_and_embed_wrapper_both_decorated() {
        let root = Element::new("div");
        let wrapper = Element::with_classes("div", &["image-embed"]);
        let embedded = Element::new("img");
        let bare = Element::new("img");
        Element::append_child(&root, &wrapper);
        Element::append_child(&wrapper, &embedded);
        Element::append_child(&root, &bare);

        let (decorator, _) = decorator_with("md");
        let count = decorator.decorate(&root);

        assert_eq!(count, 2);
        assert_eq!(embedded.class_list(), vec!["image-style-rounded-md"]);
        assert_eq!(bare.class_list(), vec!["image-style-rounded-md"]);
    }

    #[test]
    fn test_decorate_is_idempotent() {
        let root = Element::new("div");
        let img = Element::new("img");
        Element::append_child(&root, &img);

        let decorator = decorator();
        decorator.decorate(&root);
        let after_first = img.class_list();
        decorator.decorate(&root);

        assert_eq!(img.class_list(), after_first);
        assert_eq!(after_first, vec!["image-style-rounded-sm"]);
    }

    #[test]
    fn test_empty_embed_wrapper_is_skipped() {
        let root = Element::new("div");
        let wrapper = Element::with_classes("div", &["image-embed"]);
        Element::append_child(&root, &wrapper);

        let count = decorator().decorate(&root);

        assert_eq!(count, 0);
        assert_eq!(wrapper.class_list(), vec!["image-embed"]);
    }

    #[test]
    fn test_embed_wrapper_with_non_image_first_child_is_skipped() {
        let root = Element::new("div");
        let wrapper = Element::with_classes("div", &["image-embed"]);
        Element::append_child(&root, &wrapper);
        Element::append_child(&wrapper, &Element::new("div"));

        assert_eq!(decorator().decorate(&root), 0);
    }

    #[test]
    fn test_selection_change_applies_on_next_pass() {
        let root = Element::new("div");
        let img = Element::new("img");
        Element::append_child(&root, &img);

        let (decorator, registry) = decorator_with("sm");
        decorator.decorate(&root);
        assert_eq!(img.class_list(), vec!["image-style-rounded-sm"]);

        registry.borrow_mut().set_selected("xl").unwrap();
        // The old class stays until a pass touches the image again
        assert_eq!(img.class_list(), vec!["image-style-rounded-sm"]);

        decorator.decorate(&root);
        assert_eq!(img.class_list(), vec!["image-style-rounded-xl"]);
    }

    #[test]
    fn test_unrelated_classes_are_preserved() {
        let root = Element::new("div");
        let img = Element::with_classes("img", &["user-class"]);
        Element::append_child(&root, &img);

        decorator().decorate(&root);

        assert!(img.has_class("user-class"));
        assert!(img.has_class("image-style-rounded-sm"));
        assert_eq!(img.class_list().len(), 2);
    }

    #[test]
    fn test_degenerate_persisted_table_still_yields_one_known_class() {
        let settings = ImageStyleSettings::from_persisted(Some(r#"{"styles": []}"#));
        let registry = Rc::new(RefCell::new(StyleRegistry::from_settings(&settings)));
        let decorator = ImageDecorator::new(registry);

        let img = Element::new("img");
        decorator.decorate(&img);

        assert_eq!(img.class_list(), vec!["image-style-rounded-sm"]);
    }

    #[test]
    fn test_root_image_is_decorated() {
        let img = Element::new("img");
        assert_eq!(decorator().decorate(&img), 1);
        assert!(img.has_class("image-style-rounded-sm"));
    }
}
