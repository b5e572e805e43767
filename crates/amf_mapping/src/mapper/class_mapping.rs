use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::class::{ClassRegistryArc, ClassTraitHash, ClassTraitInit, ClassTraitMessage, Model};
use crate::config::{ConfigArc, Configuration};
use crate::error::{MarshalError, TypeResolutionError};
use crate::mapper::transform::{remove_ignored, to_native_case, to_wire_case};
use crate::mapper::{ClassMapper, Instance};
use crate::mapping::{MappingSetArc, Scope, SerializationPolicy};
use crate::serialization::{populate_attributes, serializable_hash};
use crate::value::{KeyStyle, PropertyMap, TypedObject, Value};

// -----------------------------------------------------------------------------
// ClassMapping

/// The object marshaler.
///
/// Resolves class names through a shared [`MappingSet`](crate::mapping::MappingSet),
/// builds objects from a shared [`ClassRegistry`](crate::class::ClassRegistry)
/// and reads a shared [`Configuration`] on every call. One `ClassMapping` is
/// typically created per request, with the request's mapping scope.
///
/// # Examples
///
/// ```
/// use amf_mapping::class::{Class, ClassRegistry, Model};
/// use amf_mapping::mapper::{ClassMapper, ClassMapping};
/// use amf_mapping::mapping::{MapOptions, MappingSet};
/// use amf_mapping::value::{PropertyMap, Value};
///
/// #[derive(Debug, Default)]
/// struct User {
///     attrs: PropertyMap,
/// }
///
/// impl Model for User {
///     fn type_path(&self) -> &'static str {
///         Self::TYPE_PATH
///     }
///
///     fn attributes(&self) -> Option<PropertyMap> {
///         Some(self.attrs.clone())
///     }
///
///     fn assign_attributes(&mut self, attrs: PropertyMap) -> Result<(), PropertyMap> {
///         self.attrs.merge(attrs);
///         Ok(())
///     }
/// }
///
/// impl Class for User {
///     const TYPE_PATH: &'static str = "app::User";
///
///     fn allocate() -> Self {
///         Self {
///             attrs: [("name", Value::Null)].into_iter().collect(),
///         }
///     }
/// }
///
/// let mut classes = ClassRegistry::new();
/// classes.register::<User>();
///
/// let mut mappings = MappingSet::new();
/// mappings.map(MapOptions::new(User::TYPE_PATH, "com.app.User")).unwrap();
///
/// let mapper = ClassMapping::new(mappings.into(), classes.into(), Default::default());
///
/// let mut user = mapper.instantiate("com.app.User").unwrap();
/// let props: PropertyMap = [("name", "Ada")].into_iter().collect();
/// mapper.populate(&mut user, props.clone(), None).unwrap();
///
/// let user = user.into_value();
/// assert_eq!(mapper.wire_type_name_of(&user).unwrap().as_deref(), Some("com.app.User"));
/// assert_eq!(mapper.properties_for(&user).unwrap(), props);
/// ```
#[derive(Debug, Default)]
pub struct ClassMapping {
    mappings: MappingSetArc,
    classes: ClassRegistryArc,
    config: ConfigArc,
    mapping_scope: Option<Scope>,
    warnings: AtomicUsize,
}

impl ClassMapping {
    pub fn new(mappings: MappingSetArc, classes: ClassRegistryArc, config: ConfigArc) -> Self {
        Self {
            mappings,
            classes,
            config,
            mapping_scope: None,
            warnings: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn mappings(&self) -> &MappingSetArc {
        &self.mappings
    }

    #[inline]
    pub fn classes(&self) -> &ClassRegistryArc {
        &self.classes
    }

    #[inline]
    pub fn config(&self) -> &ConfigArc {
        &self.config
    }

    #[inline]
    pub fn mapping_scope(&self) -> Option<&Scope> {
        self.mapping_scope.as_ref()
    }

    /// Sets the scope used to resolve policies. `None` uses each mapping's
    /// default scope.
    pub fn set_mapping_scope(&mut self, scope: Option<Scope>) {
        self.mapping_scope = scope;
    }

    /// Builder form of [`set_mapping_scope`](Self::set_mapping_scope).
    pub fn with_mapping_scope(mut self, scope: impl Into<Scope>) -> Self {
        self.mapping_scope = Some(scope.into());
        self
    }

    /// Number of population warnings raised through this marshaler.
    #[inline]
    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    fn flatten(
        &self,
        model: &dyn Model,
        options: &mut SerializationPolicy,
        config: &Configuration,
    ) -> Result<PropertyMap, MarshalError> {
        let hook = self
            .classes
            .read()
            .get_class_trait::<ClassTraitHash>(model.type_path())
            .copied();

        match hook {
            Some(hook) => hook.hash(model, options, config).map_err(MarshalError::Hook),
            None => Ok(serializable_hash(model, options, config)),
        }
    }

    fn ignore_fields(&self, type_path: Option<&str>, config: &Configuration) -> Vec<String> {
        let scoped = type_path
            .and_then(|path| self.mappings.resolve_policy(path, self.mapping_scope.as_ref()))
            .map(|policy| policy.ignore_fields)
            .unwrap_or_default();

        if scoped.is_empty() {
            config.ignore_fields.clone()
        } else {
            scoped
        }
    }
}

impl ClassMapper for ClassMapping {
    fn wire_type_name_of(&self, value: &Value) -> Result<Option<String>, MarshalError> {
        let native = match value {
            Value::String(name) => name.as_str(),
            Value::Typed(typed) => typed.type_name(),
            Value::Deferred(deferred) => deferred.object().type_path(),
            Value::Object(object) => object.type_path(),
            _ => return Ok(None),
        };
        if native.is_empty() {
            return Ok(None);
        }

        let wire = self.mappings.read().wire_name_for(native).map(String::from);
        if wire.is_some() {
            return Ok(wire);
        }

        if !self.config.read().auto_class_mapping {
            log::trace!("`{native}` is unmapped, encoding it anonymously");
            return Ok(None);
        }

        let wire = self.mappings.write().auto_map_native(native)?;
        Ok(Some(wire))
    }

    fn instantiate(&self, wire: &str) -> Result<Instance, MarshalError> {
        if wire.is_empty() {
            return Err(TypeResolutionError::EmptyName.into());
        }

        let native = self.mappings.read().native_name_for(wire).map(String::from);
        let native = match native {
            Some(native) => native,
            None if self.config.read().auto_class_mapping => self.mappings.write().auto_map_wire(wire)?,
            None => {
                log::trace!("`{wire}` is unmapped, decoding it as a typed object");
                return Ok(Instance::Typed(TypedObject::new(wire)));
            }
        };

        // Class code may touch the registry, so the read lock ends here.
        let (constructor, initialize) = {
            let classes = self.classes.read();
            let Some(meta) = classes.get_with_type_path(&native) else {
                return Err(TypeResolutionError::UnknownClass(native).into());
            };
            (meta.constructor(), !meta.has_trait::<ClassTraitInit>())
        };

        Ok(Instance::Object(constructor.build(initialize)))
    }

    fn populate(
        &self,
        target: &mut Instance,
        mut props: PropertyMap,
        mut dynamic: Option<PropertyMap>,
    ) -> Result<(), MarshalError> {
        let config = self.config.read().clone();

        let (type_path, is_message, hook) = match target {
            Instance::Object(model) => {
                let classes = self.classes.read();
                let meta = classes.get_with_type_path(model.type_path());
                (
                    Some(model.type_path()),
                    meta.is_some_and(|meta| meta.has_trait::<ClassTraitMessage>()),
                    meta.and_then(|meta| meta.get_trait::<ClassTraitInit>()).copied(),
                )
            }
            Instance::Typed(_) => (None, false, None),
        };

        if config.translate_case && !is_message {
            props = to_native_case(props);
            dynamic = dynamic.map(to_native_case);
        }

        if config.hash_key_access == KeyStyle::Symbol && type_path.is_none() {
            props = props.into_key_style(KeyStyle::Symbol);
            dynamic = dynamic.map(|dynamic| dynamic.into_key_style(KeyStyle::Symbol));
        }

        let ignored = self.ignore_fields(type_path, &config);
        remove_ignored(&mut props, &ignored);
        if let Some(dynamic) = dynamic.as_mut() {
            remove_ignored(dynamic, &ignored);
        }

        match target {
            Instance::Typed(typed) => {
                let properties = typed.properties_mut();
                properties.merge(props);
                if let Some(dynamic) = dynamic {
                    properties.merge(dynamic);
                }
            }
            Instance::Object(model) => match hook {
                Some(hook) => hook.init(model.as_mut(), props, dynamic).map_err(MarshalError::Hook)?,
                None => {
                    let warnings = populate_attributes(model.as_mut(), props, dynamic);
                    self.warnings.fetch_add(warnings.len(), Ordering::Relaxed);
                }
            },
        }

        Ok(())
    }

    fn properties_for(&self, value: &Value) -> Result<PropertyMap, MarshalError> {
        let config = self.config.read().clone();

        let props = match value {
            Value::Deferred(deferred) => {
                let mut options = deferred.options().cloned().unwrap_or_default();
                self.flatten(deferred.object().as_ref(), &mut options, &config)?
            }
            Value::Object(object) => {
                let mut options = self
                    .mappings
                    .resolve_policy(object.type_path(), self.mapping_scope.as_ref())
                    .unwrap_or_default();
                self.flatten(object.as_ref(), &mut options, &config)?
            }
            Value::Typed(typed) => typed.properties().clone(),
            Value::Map(map) => map.clone(),
            _ => PropertyMap::new(),
        };

        Ok(if config.translate_case {
            to_wire_case(props)
        } else {
            props
        })
    }
}

// -----------------------------------------------------------------------------
// Tests
