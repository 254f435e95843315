use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use vc_utils::hash::HashMap;

use super::Serde;
use crate::format::{ArrayFormat, Deformatter, Formatter};
use crate::handler::{
    DateTimeHandler, DictionaryHandler, EnumHandler, EnumOnArrayWriter, NativeHandler,
    ObjectReader, ObjectWriter, PropertyReader, PropertyWriter, ScalarHandler, SequenceHandler,
    TimeZoneHandler,
};
use crate::registry::TypeRegistry;

/// Configures a [`Serde`].
///
/// # Handler order
///
/// The built-in scalar, array and date handlers are consulted first and
/// cannot be overridden. Custom handlers come next, ahead of the enum,
/// native and object handlers, so they can take over any class or enum.
///
/// # Formats
///
/// `array` is always available. `json` and `yaml` are added when their
/// features are enabled. Registering a format under an existing name
/// replaces it.
pub struct SerdeBuilder {
    registry: Option<Arc<TypeRegistry>>,
    readers: Vec<Arc<dyn PropertyReader>>,
    writers: Vec<Arc<dyn PropertyWriter>>,
    formatters: HashMap<String, Arc<dyn Formatter>>,
    deformatters: HashMap<String, Arc<dyn Deformatter>>,
}

impl Default for SerdeBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SerdeBuilder {
    pub fn new() -> Self {
        let builder = Self {
            registry: None,
            readers: Vec::new(),
            writers: Vec::new(),
            formatters: HashMap::default(),
            deformatters: HashMap::default(),
        };

        let builder = builder.format(ArrayFormat);

        crate::cfg::json! {
            let builder = builder.format(crate::format::JsonFormat::default());
        }

        crate::cfg::yaml! {
            let builder = builder.format(crate::format::YamlFormat);
        }

        builder
    }

    #[inline]
    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = Some(Arc::new(registry));
        self
    }

    /// Uses a registry shared with other engines.
    #[inline]
    pub fn shared_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[inline]
    pub fn reader(mut self, reader: impl PropertyReader + 'static) -> Self {
        self.readers.push(Arc::new(reader));
        self
    }

    #[inline]
    pub fn writer(mut self, writer: impl PropertyWriter + 'static) -> Self {
        self.writers.push(Arc::new(writer));
        self
    }

    /// Adds a handler that works in both directions.
    pub fn handler<H: PropertyReader + PropertyWriter + 'static>(mut self, handler: H) -> Self {
        let handler = Arc::new(handler);
        self.readers.push(handler.clone());
        self.writers.push(handler);
        self
    }

    /// Adds a format that can be both written and read.
    pub fn format<F: Formatter + Deformatter + 'static>(mut self, format: F) -> Self {
        let format = Arc::new(format);
        let name = String::from(Formatter::format(format.as_ref()));
        self.formatters.insert(name.clone(), format.clone());
        self.deformatters.insert(name, format);
        self
    }

    #[inline]
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatters
            .insert(String::from(Formatter::format(&formatter)), Arc::new(formatter));
        self
    }

    #[inline]
    pub fn deformatter(mut self, deformatter: impl Deformatter + 'static) -> Self {
        self.deformatters
            .insert(String::from(Deformatter::format(&deformatter)), Arc::new(deformatter));
        self
    }

    pub fn build(self) -> Serde {
        let mut readers: Vec<Arc<dyn PropertyReader>> = Vec::from([
            Arc::new(ScalarHandler) as Arc<dyn PropertyReader>,
            Arc::new(SequenceHandler),
            Arc::new(DictionaryHandler),
            Arc::new(DateTimeHandler),
            Arc::new(TimeZoneHandler),
        ]);
        readers.extend(self.readers);
        readers.extend([
            Arc::new(EnumHandler) as Arc<dyn PropertyReader>,
            Arc::new(NativeHandler),
            Arc::new(ObjectReader),
        ]);

        let mut writers: Vec<Arc<dyn PropertyWriter>> = Vec::from([
            Arc::new(ScalarHandler) as Arc<dyn PropertyWriter>,
            Arc::new(SequenceHandler),
            Arc::new(DictionaryHandler),
            Arc::new(DateTimeHandler),
            Arc::new(TimeZoneHandler),
        ]);
        writers.extend(self.writers);
        writers.extend([
            Arc::new(EnumOnArrayWriter) as Arc<dyn PropertyWriter>,
            Arc::new(EnumHandler),
            Arc::new(NativeHandler),
            Arc::new(ObjectWriter),
        ]);

        let registry = self.registry.unwrap_or_else(|| Arc::new(TypeRegistry::new()));
        log::debug!(
            "built serde with {} types, {} readers, {} writers",
            registry.len(),
            readers.len(),
            writers.len(),
        );

        Serde {
            registry,
            readers,
            writers,
            formatters: self.formatters,
            deformatters: self.deformatters,
        }
    }
}
