// Uniform slide heights for one slider, measured from the first slide's image.
// Rule: never apply a zero height. Below the breakpoint every override is cleared.

use serde::Serialize;
use tracing::debug;

use crate::host::LayoutHost;
use crate::types::LayoutConfig;

/// One inline CSS property write. An empty value removes the override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleProperty {
    pub name: &'static str,
    pub value: String,
}

impl StyleProperty {
    pub fn set(name: &'static str, value: impl Into<String>) -> Self {
        StyleProperty {
            name,
            value: value.into(),
        }
    }

    pub fn clear(name: &'static str) -> Self {
        StyleProperty {
            name,
            value: String::new(),
        }
    }
}

/// Inline overrides for a class of slot: the container box and the image inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStyle {
    pub container: Vec<StyleProperty>,
    pub image: Vec<StyleProperty>,
}

impl SlotStyle {
    /// Fixed height, contents centered, image scaled to fit inside.
    pub fn image_slot(height_px: f64) -> Self {
        SlotStyle {
            container: vec![
                StyleProperty::set("height", px(height_px)),
                StyleProperty::set("display", "flex"),
                StyleProperty::set("align-items", "center"),
            ],
            image: vec![
                StyleProperty::set("height", "100%"),
                StyleProperty::set("object-fit", "contain"),
            ],
        }
    }

    /// Fixed height only. The image fills the height and overflows sideways; the
    /// container clips it according to its alignment class.
    pub fn crop_slot(height_px: f64) -> Self {
        SlotStyle {
            container: vec![StyleProperty::set("height", px(height_px))],
            image: vec![
                StyleProperty::set("height", "100%"),
                StyleProperty::set("width", "auto"),
                StyleProperty::set("object-fit", "cover"),
            ],
        }
    }

    /// Removes every property either slot kind may have set.
    pub fn cleared() -> Self {
        SlotStyle {
            container: vec![
                StyleProperty::clear("height"),
                StyleProperty::clear("display"),
                StyleProperty::clear("align-items"),
            ],
            image: vec![
                StyleProperty::clear("height"),
                StyleProperty::clear("width"),
                StyleProperty::clear("object-fit"),
            ],
        }
    }
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

/// What a synchronization pass did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LayoutOutcome {
    /// Viewport below the breakpoint; overrides removed.
    Cleared,
    /// First image has no usable height yet; nothing changed.
    Deferred,
    /// Every slot now shares `height`.
    Applied { height: f64 },
}

/// Recomputes and applies slot heights for one slider.
#[derive(Debug, Clone, Default)]
pub struct LayoutSynchronizer {
    config: LayoutConfig,
}

impl LayoutSynchronizer {
    pub fn new(config: LayoutConfig) -> Self {
        LayoutSynchronizer { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn sync<H: LayoutHost>(&self, host: &mut H) -> LayoutOutcome {
        let outcome = self.sync_inner(host);
        debug!(?outcome, "layout synchronized");
        outcome
    }

    fn sync_inner<H: LayoutHost>(&self, host: &mut H) -> LayoutOutcome {
        if self.config.is_mobile(host.viewport_width()) {
            let cleared = SlotStyle::cleared();
            host.style_image_slots(&cleared);
            host.style_crop_slots(&cleared);
            return LayoutOutcome::Cleared;
        }

        // Measure the natural rendered height, not the one we forced last time.
        host.clear_first_slot_height();
        let height = match host.first_image_height() {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => return LayoutOutcome::Deferred,
        };

        host.style_image_slots(&SlotStyle::image_slot(height));
        host.style_crop_slots(&SlotStyle::crop_slot(height));
        LayoutOutcome::Applied { height }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeLayoutHost;
    use super::*;

    #[test]
    fn desktop_applies_first_image_height_everywhere() {
        let mut host = FakeLayoutHost::new(1024.0, 3, 0);
        let outcome = LayoutSynchronizer::default().sync(&mut host);

        assert_eq!(outcome, LayoutOutcome::Applied { height: 400.0 });
        for slot in 0..3 {
            assert_eq!(host.image_slot_prop(slot, "height"), Some("400px"));
            assert_eq!(host.image_slot_prop(slot, "display"), Some("flex"));
            assert_eq!(host.image_slot_prop(slot, "align-items"), Some("center"));
            assert_eq!(host.image_slot_prop(slot, "img:object-fit"), Some("contain"));
        }
    }

    #[test]
    fn mobile_clears_all_overrides() {
        let mut host = FakeLayoutHost::new(1024.0, 3, 1);
        let sync = LayoutSynchronizer::default();
        sync.sync(&mut host);

        host.viewport_width = 500.0;
        assert_eq!(sync.sync(&mut host), LayoutOutcome::Cleared);
        for slot in 0..3 {
            assert_eq!(host.image_slot_prop(slot, "height"), Some(""));
            assert_eq!(host.image_slot_prop(slot, "display"), Some(""));
            assert_eq!(host.image_slot_prop(slot, "img:height"), Some(""));
        }
        assert_eq!(host.crop_slot_prop(0, "height"), Some(""));
        assert_eq!(host.crop_slot_prop(0, "img:width"), Some(""));
    }

    #[test]
    fn crop_slots_get_height_without_centering() {
        let mut host = FakeLayoutHost::new(1024.0, 1, 2);
        LayoutSynchronizer::default().sync(&mut host);

        for slot in 0..2 {
            assert_eq!(host.crop_slot_prop(slot, "height"), Some("400px"));
            assert_eq!(host.crop_slot_prop(slot, "display"), None);
            assert_eq!(host.crop_slot_prop(slot, "img:height"), Some("100%"));
            assert_eq!(host.crop_slot_prop(slot, "img:width"), Some("auto"));
            assert_eq!(host.crop_slot_prop(slot, "img:object-fit"), Some("cover"));
        }
    }

    #[test]
    fn zero_height_defers() {
        let mut host = FakeLayoutHost::new(1024.0, 2, 0);
        host.natural_first_height = Some(0.0);
        assert_eq!(
            LayoutSynchronizer::default().sync(&mut host),
            LayoutOutcome::Deferred
        );
        assert!(host.image_slots.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn missing_first_image_defers() {
        let mut host = FakeLayoutHost::new(1024.0, 2, 0);
        host.natural_first_height = None;
        assert_eq!(
            LayoutSynchronizer::default().sync(&mut host),
            LayoutOutcome::Deferred
        );
    }

    #[test]
    fn resync_measures_unforced_height() {
        let mut host = FakeLayoutHost::new(1024.0, 2, 0);
        let sync = LayoutSynchronizer::default();
        sync.sync(&mut host);

        host.natural_first_height = Some(320.0);
        assert_eq!(sync.sync(&mut host), LayoutOutcome::Applied { height: 320.0 });
        assert_eq!(host.image_slot_prop(1, "height"), Some("320px"));
    }

    #[test]
    fn fractional_heights_keep_precision() {
        assert_eq!(SlotStyle::image_slot(412.5).container[0].value, "412.5px");
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_string(&LayoutOutcome::Applied { height: 400.0 }).unwrap();
        assert_eq!(json, r#"{"outcome":"applied","height":400.0}"#);
    }
}
