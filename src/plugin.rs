use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::{
    decorate::ImageDecorator,
    dom::ElementRef,
    error::Result,
    observe::{EditorView, LiveEditObserver, RenderObserver, WatcherSet},
    settings::{ImageStyleSettings, SettingsStore},
    styles::StyleRegistry,
};

/// Plugin entry points, wired to the host's lifecycle callbacks
///
/// The host drives everything: [`load`](ImageStylePlugin::load) on
/// activation, [`on_render`](ImageStylePlugin::on_render) for each rendered
/// document fragment, [`on_editor_update`](ImageStylePlugin::on_editor_update)
/// for each live-editor view update, [`select_style`](ImageStylePlugin::select_style)
/// from the settings panel, and [`unload`](ImageStylePlugin::unload) on
/// deactivation.
pub struct ImageStylePlugin<S: SettingsStore> {
    store: S,
    registry: Rc<RefCell<StyleRegistry>>,
    render: RenderObserver,
    live_edit: LiveEditObserver,
    watchers: WatcherSet,
}

impl<S: SettingsStore> ImageStylePlugin<S> {
    /// Activate the plugin: merge persisted settings over defaults and build
    /// the registry, decorator, and adapters.
    ///
    /// Activation never fails on bad settings data; a store read error or
    /// malformed settings object falls back to the defaults.
    pub fn load(store: S) -> Self {
        let raw = match store.load() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read persisted settings, using defaults: {}", e);
                None
            }
        };
        let settings = ImageStyleSettings::from_persisted(raw.as_deref());

        let registry = Rc::new(RefCell::new(StyleRegistry::from_settings(&settings)));
        let decorator = Rc::new(ImageDecorator::new(Rc::clone(&registry)));

        info!(
            "image-style loaded, selected style '{}'",
            registry.borrow().selected()
        );

        Self {
            store,
            registry: Rc::clone(&registry),
            render: RenderObserver::new(Rc::clone(&decorator)),
            live_edit: LiveEditObserver::new(decorator),
            watchers: WatcherSet::new(),
        }
    }

    /// Host render callback: decorate a freshly rendered fragment and keep
    /// watching it for inserted images until deactivation.
    pub fn on_render(&mut self, fragment: &ElementRef) {
        let watcher = self.render.observe_fragment(fragment);
        self.watchers.register(watcher);
        debug!("Watching rendered fragment ({} active)", self.watchers.len());
    }

    /// Host editor extension point: decorate the editing surface's realized
    /// DOM on a view update.
    pub fn on_editor_update(&self, view: &EditorView) {
        self.live_edit.on_view_update(view);
    }

    /// Settings-panel callback: change the active selection and persist it.
    ///
    /// Rejects unknown identifiers, leaving selection and store untouched.
    /// Already-rendered images keep their old class until the next decoration
    /// pass touches them; there is no retroactive rescan.
    pub fn select_style(&mut self, name: &str) -> Result<()> {
        self.registry.borrow_mut().set_selected(name)?;
        self.store.save(&self.registry.borrow().to_settings())?;
        debug!("Selection changed to '{}'", name);
        Ok(())
    }

    /// Identifier of the currently selected style
    pub fn selected_style(&self) -> String {
        self.registry.borrow().selected().to_string()
    }

    /// Dropdown options for the host settings panel
    pub fn dropdown_options(&self) -> Vec<(String, String)> {
        self.registry
            .borrow()
            .to_settings()
            .dropdown_options()
            .iter()
            .map(|(name, label)| (name.to_string(), label.to_string()))
            .collect()
    }

    /// Deactivate the plugin: persist the current settings one last time and
    /// release every mutation watcher.
    pub fn unload(&mut self) -> Result<()> {
        self.watchers.disconnect_all();
        self.store.save(&self.registry.borrow().to_settings())?;
        info!("image-style unloaded");
        Ok(())
    }
}
