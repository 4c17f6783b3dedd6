use std::fmt::{self, Formatter};

/// A named, typed parameter of a [`MethodSignature`].
///
/// The type is descriptive only; it shows up in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: String,
}

/// Description of a mocked method: its name, its parameters, an
/// optional trailing variadic parameter, and its return types.
///
/// The variadic parameter is gathered into a single trailing `Vec<T>`
/// element of the method's argument tuple.
///
/// ```
/// use decoy::MethodSignature;
///
/// let signature = MethodSignature::new("should_be_fun")
///     .param("a", "i32")
///     .param("m", "HashMap<String, bool>")
///     .variadic("rest", "u8")
///     .returns("i32")
///     .returns("Option<String>");
///
/// assert_eq!(signature.arity(), 3);
/// assert_eq!(signature.return_types().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    name: String,
    params: Vec<Parameter>,
    variadic: Option<Parameter>,
    returns: Vec<String>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>) -> Self {
        MethodSignature {
            name: name.into(),
            params: vec![],
            variadic: None,
            returns: vec![],
        }
    }

    /// Appends a parameter.
    pub fn param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(Parameter {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    /// Sets the trailing variadic parameter. `ty` is the type of each
    /// gathered element.
    pub fn variadic(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.variadic = Some(Parameter {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    /// Appends a return type.
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns.push(ty.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn variadic_param(&self) -> Option<&Parameter> {
        self.variadic.as_ref()
    }

    pub fn return_types(&self) -> &[String] {
        &self.returns
    }

    /// Number of elements in the argument tuple, counting the
    /// variadic parameter as one.
    pub fn arity(&self) -> usize {
        self.params.len() + usize::from(self.variadic.is_some())
    }

    /// Name of the parameter at a 0-based tuple position.
    pub(crate) fn param_name(&self, position: usize) -> String {
        match self.params.get(position) {
            Some(param) => param.name.clone(),
            None => match &self.variadic {
                Some(variadic) => format!("{}...", variadic.name),
                None => format!("#{}", position + 1),
            },
        }
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut params: Vec<_> = self
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect();
        if let Some(variadic) = &self.variadic {
            params.push(format!("{}: ...{}", variadic.name, variadic.ty));
        }
        write!(f, "{}({})", self.name, params.join(", "))?;

        match self.returns.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " -> {}", single),
            many => write!(f, " -> ({})", many.join(", ")),
        }
    }
}
