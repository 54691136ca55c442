//! # Pessoa Forms
//!
//! Headless models of the two forms of the application:
//!
//! - [`PessoaForm`]: registration: nome, cpf, sexo, email, telefone.
//! - [`SearchForm`]: lookup by CPF.
//!
//! Each control re-runs its rules on every value change. A control's
//! message is only shown once it has been touched; submitting an invalid
//! form marks every control as touched so all messages appear at once.

use std::collections::BTreeMap;

use crate::error::FormError;
use crate::input::{InputTarget, MaskKind};
use crate::mask;
use crate::messages::FormErrorResolver;
use crate::pessoa::PessoaDados;
use crate::validation::{validate_all, FieldErrors, Pattern, Rule, Validator};

/// Fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Nome,
    Cpf,
    Sexo,
    Email,
    Telefone,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 5] = [
        Self::Nome,
        Self::Cpf,
        Self::Sexo,
        Self::Email,
        Self::Telefone,
    ];

    /// Field name, as used for labels and error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nome => "nome",
            Self::Cpf => "cpf",
            Self::Sexo => "sexo",
            Self::Email => "email",
            Self::Telefone => "telefone",
        }
    }

    /// The live mask of the field, if it has one.
    pub fn mask(&self) -> Option<MaskKind> {
        match self {
            Self::Cpf => Some(MaskKind::Cpf),
            Self::Telefone => Some(MaskKind::Telefone),
            Self::Nome | Self::Sexo | Self::Email => None,
        }
    }

    fn value_of<'a>(&self, pessoa: &'a PessoaDados) -> &'a str {
        match self {
            Self::Nome => &pessoa.nome,
            Self::Cpf => &pessoa.cpf,
            Self::Sexo => &pessoa.sexo,
            Self::Email => &pessoa.email,
            Self::Telefone => &pessoa.telefone,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown field: {s}"))
    }
}

/// Validation setup of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    pub required: bool,
    /// Disabled controls are never validated.
    pub disabled: bool,
    /// Format the value must match in full, checked after `rules`.
    pub pattern: Option<Pattern>,
    pub rules: Vec<Rule>,
}

impl FieldConfig {
    /// Configuration of a registration-form field.
    pub fn for_field(field: Field) -> Self {
        match field {
            Field::Nome => Self {
                required: true,
                disabled: false,
                pattern: None,
                rules: vec![Rule::Required, Rule::MinLength(2)],
            },
            Field::Cpf => Self {
                required: true,
                disabled: false,
                pattern: Some(Pattern::Cpf),
                rules: vec![Rule::Required, Rule::Cpf],
            },
            Field::Sexo => Self {
                required: true,
                disabled: false,
                pattern: None,
                rules: vec![Rule::Required],
            },
            Field::Email => Self {
                required: true,
                disabled: false,
                pattern: Some(Pattern::Email),
                rules: vec![Rule::Required, Rule::Email],
            },
            Field::Telefone => Self {
                required: false,
                disabled: false,
                pattern: Some(Pattern::Telefone),
                rules: vec![Rule::Telefone],
            },
        }
    }

    /// Configuration of the lookup form's CPF field.
    pub fn search_cpf() -> Self {
        Self {
            required: true,
            disabled: false,
            pattern: None,
            rules: vec![Rule::Required, Rule::Cpf],
        }
    }

    /// Run every rule and the pattern against `value`.
    pub fn validate(&self, value: Option<&str>) -> FieldErrors {
        if self.disabled {
            return FieldErrors::new();
        }
        let mut errors = validate_all(&self.rules, value);
        if let Some(flag) = self.pattern.and_then(|p| Rule::Pattern(p).validate(value)) {
            errors.insert(flag);
        }
        errors
    }
}

/// State of one form control.
#[derive(Debug, Clone)]
pub struct FormControl {
    config: FieldConfig,
    value: Option<String>,
    touched: bool,
    dirty: bool,
    errors: FieldErrors,
}

impl FormControl {
    /// An empty, untouched control; its rules already ran on the empty value.
    pub fn new(config: FieldConfig) -> Self {
        let errors = config.validate(None);
        Self {
            config,
            value: None,
            touched: false,
            dirty: false,
            errors,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the value, mark the control dirty, and revalidate.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
        self.dirty = true;
        self.revalidate();
    }

    /// Active flags for the current value.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn mark_as_touched(&mut self) {
        self.touched = true;
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the value and the touched/dirty state.
    pub fn reset(&mut self) {
        self.value = None;
        self.touched = false;
        self.dirty = false;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = self.config.validate(self.value.as_deref());
    }

    /// Errors to display: the current flags once the control was touched.
    fn visible_errors(&self) -> Option<&FieldErrors> {
        (self.touched && !self.errors.is_empty()).then_some(&self.errors)
    }
}

/// The registration form.
#[derive(Debug, Clone)]
pub struct PessoaForm {
    controls: BTreeMap<Field, FormControl>,
    resolver: FormErrorResolver,
}

impl Default for PessoaForm {
    fn default() -> Self {
        Self::new(FormErrorResolver::default())
    }
}

impl PessoaForm {
    pub fn new(resolver: FormErrorResolver) -> Self {
        let controls = Field::ALL
            .into_iter()
            .map(|field| (field, FormControl::new(FieldConfig::for_field(field))))
            .collect();
        Self { controls, resolver }
    }

    pub fn control(&self, field: Field) -> &FormControl {
        &self.controls[&field]
    }

    fn control_mut(&mut self, field: Field) -> &mut FormControl {
        self.controls
            .entry(field)
            .or_insert_with(|| FormControl::new(FieldConfig::for_field(field)))
    }

    /// Set a field's value, revalidating it.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.control_mut(field).set_value(value);
    }

    /// Set every field from a record.
    pub fn fill(&mut self, pessoa: &PessoaDados) {
        for field in Field::ALL {
            self.set_value(field, field.value_of(pessoa));
        }
    }

    /// Handle a keystroke in `field`: mask the target in place when the
    /// field has a mask, then take its value.
    pub fn apply_input<T: InputTarget + ?Sized>(&mut self, field: Field, target: &mut T) {
        if let Some(kind) = field.mask() {
            kind.apply(Some(&mut *target));
        }
        self.set_value(field, target.value());
    }

    pub fn mark_all_touched(&mut self) {
        for control in self.controls.values_mut() {
            control.mark_as_touched();
        }
    }

    pub fn mark_as_touched(&mut self, field: Field) {
        self.control_mut(field).mark_as_touched();
    }

    pub fn is_valid(&self) -> bool {
        self.controls.values().all(FormControl::is_valid)
    }

    /// Message under `field`; empty unless it is touched and has errors.
    pub fn error_message(&self, field: Field) -> String {
        self.control(field)
            .visible_errors()
            .map(|errors| self.resolver.resolve(field.as_str(), errors))
            .unwrap_or_default()
    }

    /// Active flags of every field that has any, touched or not.
    pub fn errors(&self) -> BTreeMap<String, FieldErrors> {
        self.controls
            .iter()
            .filter(|(_, control)| !control.is_valid())
            .map(|(field, control)| (field.as_str().to_string(), control.errors().clone()))
            .collect()
    }

    /// Whether any field was edited since creation or the last reset.
    pub fn has_unsaved_changes(&self) -> bool {
        self.controls.values().any(FormControl::dirty)
    }

    pub fn reset(&mut self) {
        for control in self.controls.values_mut() {
            control.reset();
        }
    }

    /// The current values as a record; missing values become empty strings.
    pub fn value(&self) -> PessoaDados {
        let get = |field: Field| self.control(field).value().unwrap_or_default().to_string();
        PessoaDados {
            nome: get(Field::Nome),
            cpf: get(Field::Cpf),
            sexo: get(Field::Sexo),
            email: get(Field::Email),
            telefone: get(Field::Telefone),
        }
    }

    /// Submit the form.
    ///
    /// # Errors
    ///
    /// When any field has errors, marks every control as touched and
    /// returns a [`FormError`] with the active flags.
    pub fn submit(&mut self) -> Result<PessoaDados, FormError> {
        if !self.is_valid() {
            self.mark_all_touched();
            return Err(FormError {
                errors: self.errors(),
            });
        }
        Ok(self.value())
    }
}

/// The lookup form: a single CPF field.
#[derive(Debug, Clone)]
pub struct SearchForm {
    cpf: FormControl,
    resolver: FormErrorResolver,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new(FormErrorResolver::default())
    }
}

impl SearchForm {
    pub fn new(resolver: FormErrorResolver) -> Self {
        Self {
            cpf: FormControl::new(FieldConfig::search_cpf()),
            resolver,
        }
    }

    pub fn control(&self) -> &FormControl {
        &self.cpf
    }

    pub fn set_cpf(&mut self, value: impl Into<String>) {
        self.cpf.set_value(value);
    }

    /// Handle a keystroke in the CPF field.
    pub fn apply_input<T: InputTarget + ?Sized>(&mut self, target: &mut T) {
        MaskKind::Cpf.apply(Some(&mut *target));
        self.cpf.set_value(target.value());
    }

    pub fn is_valid(&self) -> bool {
        self.cpf.is_valid()
    }

    /// Whether the field holds anything besides whitespace.
    pub fn has_value(&self) -> bool {
        self.cpf.value().is_some_and(|v| !v.trim().is_empty())
    }

    /// The CPF digits to query with.
    pub fn cpf_digits(&self) -> String {
        mask::remove_mask(self.cpf.value())
    }

    pub fn mark_all_touched(&mut self) {
        self.cpf.mark_as_touched();
    }

    /// Message under the CPF field; empty unless touched with errors.
    pub fn error_message(&self) -> String {
        self.cpf
            .visible_errors()
            .map(|errors| self.resolver.resolve(Field::Cpf.as_str(), errors))
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.cpf.reset();
    }

    /// Submit the search.
    ///
    /// # Errors
    ///
    /// When the CPF is missing or invalid, marks the field as touched and
    /// returns a [`FormError`].
    pub fn submit(&mut self) -> Result<String, FormError> {
        if !self.is_valid() {
            self.mark_all_touched();
            let mut errors = BTreeMap::new();
            errors.insert(Field::Cpf.as_str().to_string(), self.cpf.errors().clone());
            return Err(FormError { errors });
        }
        Ok(self.cpf_digits())
    }
}
