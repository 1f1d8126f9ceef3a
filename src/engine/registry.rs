use std::collections::HashMap;

use crate::{ast::UserFunction, error::DefinitionError};

/// Grouping direction of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// Equal-precedence chains group leftward: `10 - 5 - 2` is `(10-5)-2`.
    Left,
    /// Equal-precedence chains group rightward: `2 ^ 3 ^ 2` is `2^(3^2)`.
    Right,
}

/// Describes the shape of one operator for the parser.
///
/// Unary prefix operators are registered under symbols distinct from their
/// binary counterparts (`u+`, `u-`), so the same source character `-`
/// resolves to different definitions depending on parser position without
/// ambiguity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDef {
    /// The registry symbol, e.g. `+`, `<=`, or `u-`.
    pub symbol:        String,
    /// Precedence; higher binds tighter. The standard set spaces levels by
    /// tens so that binding-power pairs never collide across levels.
    pub precedence:    u8,
    /// Grouping direction for equal-precedence chains.
    pub associativity: Associativity,
    /// `1` for prefix operators, `2` for infix operators.
    pub arity:         u8,
}

/// Type alias for native (built-in) function implementations.
///
/// A native function receives the already-evaluated argument values and
/// returns a number, or a message describing its own failure. The evaluator
/// checks arity before invoking the implementation and rewraps any `Err`
/// as [`crate::error::EvalError::FunctionFailed`].
pub type NativeFn = fn(&[f64]) -> Result<f64, String>;

/// Specifies the allowed number of arguments for a built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// The function must receive exactly this many arguments.
    Exact(usize),
    /// The function accepts any count of at least one argument.
    Variadic,
}

/// A built-in function entry: name, arity constraint, and implementation.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    /// The name the function is called by.
    pub name:  String,
    /// The number of arguments the function accepts.
    pub arity: Arity,
    /// The native implementation.
    pub func:  NativeFn,
}

/// Registers one-argument built-ins backed directly by `f64` methods.
macro_rules! unary_builtins {
    ($registry:ident, $( $name:literal => $func:expr ),* $(,)?) => {
        $(
            $registry.register_function(FunctionDef { name:  $name.to_string(),
                                                      arity: Arity::Exact(1),
                                                      func:  $func, });
        )*
    };
}

/// A mutable catalog of operators, built-in functions, constants, and
/// user-defined functions.
///
/// The parser consults the operator map for binding powers; the evaluator
/// consults the function and constant maps for symbol resolution. The four
/// maps are independent and keyed by string; re-registration overwrites,
/// except that a user function may never take a built-in function's name.
///
/// A `Registry` is an explicit value passed by reference to parser and
/// evaluator calls. Two registries never share state, so collaborators that
/// need per-session isolation give each session its own instance:
///
/// ```
/// use numex::engine::registry::{Arity, FunctionDef, Registry};
///
/// let mut a = Registry::standard();
/// let b = Registry::standard();
///
/// a.register_function(FunctionDef { name:  "double".to_string(),
///                                   arity: Arity::Exact(1),
///                                   func:  |args| Ok(args[0] * 2.0), });
///
/// assert!(a.has_function("double"));
/// assert!(!b.has_function("double"));
/// ```
#[derive(Default)]
pub struct Registry {
    operators:      HashMap<String, OperatorDef>,
    functions:      HashMap<String, FunctionDef>,
    constants:      HashMap<String, f64>,
    user_functions: HashMap<String, UserFunction>,
    observer:       Option<Box<dyn Fn(&str)>>,
}

impl Registry {
    /// Creates an empty registry with no operators, functions, or
    /// constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-seeded with the standard operator, function,
    /// and constant set.
    ///
    /// Operators: comparisons (`==`, `!=`, `<`, `>`, `<=`, `>=`), additive
    /// (`+`, `-`), multiplicative (`*`, `/`, `%`), right-associative
    /// exponentiation (`^`), and the prefix operators `u+`/`u-`, which bind
    /// tighter than everything else so that `-3^2` evaluates as
    /// `(-3)^2 = 9`.
    ///
    /// Functions: trigonometric, hyperbolic, logarithmic/exponential, and
    /// rounding one-argument functions, `abs` and `sign`, plus variadic
    /// `min`/`max`.
    ///
    /// Constants: `pi`, `e`, `phi`, `tau`, `sqrt2`, `ln2`, `ln10`.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        for symbol in ["==", "!=", "<", ">", "<=", ">="] {
            registry.register_operator(OperatorDef { symbol:        symbol.to_string(),
                                                     precedence:    10,
                                                     associativity: Associativity::Left,
                                                     arity:         2, });
        }
        for symbol in ["+", "-"] {
            registry.register_operator(OperatorDef { symbol:        symbol.to_string(),
                                                     precedence:    20,
                                                     associativity: Associativity::Left,
                                                     arity:         2, });
        }
        for symbol in ["*", "/", "%"] {
            registry.register_operator(OperatorDef { symbol:        symbol.to_string(),
                                                     precedence:    30,
                                                     associativity: Associativity::Left,
                                                     arity:         2, });
        }
        registry.register_operator(OperatorDef { symbol:        "^".to_string(),
                                                 precedence:    40,
                                                 associativity: Associativity::Right,
                                                 arity:         2, });
        for symbol in ["u+", "u-"] {
            registry.register_operator(OperatorDef { symbol:        symbol.to_string(),
                                                     precedence:    50,
                                                     associativity: Associativity::Right,
                                                     arity:         1, });
        }

        unary_builtins! { registry,
            "sin"   => |args: &[f64]| Ok(args[0].sin()),
            "cos"   => |args: &[f64]| Ok(args[0].cos()),
            "tan"   => |args: &[f64]| Ok(args[0].tan()),
            "asin"  => |args: &[f64]| Ok(args[0].asin()),
            "acos"  => |args: &[f64]| Ok(args[0].acos()),
            "atan"  => |args: &[f64]| Ok(args[0].atan()),
            "sinh"  => |args: &[f64]| Ok(args[0].sinh()),
            "cosh"  => |args: &[f64]| Ok(args[0].cosh()),
            "tanh"  => |args: &[f64]| Ok(args[0].tanh()),
            "asinh" => |args: &[f64]| Ok(args[0].asinh()),
            "acosh" => |args: &[f64]| Ok(args[0].acosh()),
            "atanh" => |args: &[f64]| Ok(args[0].atanh()),
            "ln"    => |args: &[f64]| Ok(args[0].ln()),
            "log10" => |args: &[f64]| Ok(args[0].log10()),
            "log2"  => |args: &[f64]| Ok(args[0].log2()),
            "exp"   => |args: &[f64]| Ok(args[0].exp()),
            "sqrt"  => |args: &[f64]| Ok(args[0].sqrt()),
            "cbrt"  => |args: &[f64]| Ok(args[0].cbrt()),
            "floor" => |args: &[f64]| Ok(args[0].floor()),
            "ceil"  => |args: &[f64]| Ok(args[0].ceil()),
            "round" => |args: &[f64]| Ok(args[0].round()),
            "trunc" => |args: &[f64]| Ok(args[0].trunc()),
            "abs"   => |args: &[f64]| Ok(args[0].abs()),
            "sign"  => |args: &[f64]| Ok(if args[0] == 0.0 { 0.0 } else { args[0].signum() }),
        }
        registry.register_function(FunctionDef { name:  "min".to_string(),
                                                 arity: Arity::Variadic,
                                                 func:  |args: &[f64]| {
                                                     Ok(args.iter()
                                                            .copied()
                                                            .fold(f64::INFINITY, f64::min))
                                                 }, });
        registry.register_function(FunctionDef { name:  "max".to_string(),
                                                 arity: Arity::Variadic,
                                                 func:  |args: &[f64]| {
                                                     Ok(args.iter()
                                                            .copied()
                                                            .fold(f64::NEG_INFINITY, f64::max))
                                                 }, });

        registry.register_constant("pi", std::f64::consts::PI);
        registry.register_constant("e", std::f64::consts::E);
        registry.register_constant("phi", (1.0 + 5.0_f64.sqrt()) / 2.0);
        registry.register_constant("tau", std::f64::consts::TAU);
        registry.register_constant("sqrt2", std::f64::consts::SQRT_2);
        registry.register_constant("ln2", std::f64::consts::LN_2);
        registry.register_constant("ln10", std::f64::consts::LN_10);

        registry
    }

    /// Registers an operator definition, overwriting any existing one with
    /// the same symbol.
    pub fn register_operator(&mut self, def: OperatorDef) {
        self.operators.insert(def.symbol.clone(), def);
    }

    /// Looks up an operator definition by registry symbol.
    #[must_use]
    pub fn operator(&self, symbol: &str) -> Option<&OperatorDef> {
        self.operators.get(symbol)
    }

    /// Returns `true` if an operator is registered under `symbol`.
    #[must_use]
    pub fn has_operator(&self, symbol: &str) -> bool {
        self.operators.contains_key(symbol)
    }

    /// Removes and returns the operator registered under `symbol`.
    pub fn unregister_operator(&mut self, symbol: &str) -> Option<OperatorDef> {
        self.operators.remove(symbol)
    }

    /// Removes all registered operators.
    pub fn clear_operators(&mut self) {
        self.operators.clear();
    }

    /// Lists all registered operator symbols, sorted.
    #[must_use]
    pub fn list_operators(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.operators.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Registers a built-in function, overwriting any existing one with the
    /// same name.
    pub fn register_function(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.clone(), def);
    }

    /// Looks up a built-in function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// Returns `true` if a built-in function is registered under `name`.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Removes and returns the built-in function registered under `name`.
    pub fn unregister_function(&mut self, name: &str) -> Option<FunctionDef> {
        self.functions.remove(name)
    }

    /// Removes all built-in functions.
    pub fn clear_functions(&mut self) {
        self.functions.clear();
    }

    /// Lists all built-in function names, sorted.
    #[must_use]
    pub fn list_functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registers a constant, overwriting any existing one with the same
    /// name.
    pub fn register_constant(&mut self, name: &str, value: f64) {
        self.constants.insert(name.to_string(), value);
    }

    /// Looks up a constant's value by name.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Returns `true` if a constant is registered under `name`.
    #[must_use]
    pub fn has_constant(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    /// Removes and returns the constant registered under `name`.
    pub fn unregister_constant(&mut self, name: &str) -> Option<f64> {
        self.constants.remove(name)
    }

    /// Removes all constants.
    pub fn clear_constants(&mut self) {
        self.constants.clear();
    }

    /// Lists all constant names, sorted.
    #[must_use]
    pub fn list_constants(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constants.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registers a user-defined function.
    ///
    /// User functions occupy a separate namespace checked before built-ins
    /// at call sites. Redefining an existing user function overwrites it;
    /// taking a built-in function's name is rejected.
    ///
    /// The change observer, if one is installed, is notified with the
    /// function's name.
    ///
    /// # Errors
    /// Returns [`DefinitionError::NameCollision`] if `func.name` is already
    /// a built-in function.
    pub fn define_function(&mut self, func: UserFunction) -> Result<(), DefinitionError> {
        if self.functions.contains_key(&func.name) {
            return Err(DefinitionError::NameCollision { name: func.name });
        }

        let name = func.name.clone();
        self.user_functions.insert(name.clone(), func);
        self.notify(&name);
        Ok(())
    }

    /// Looks up a user-defined function by name.
    #[must_use]
    pub fn user_function(&self, name: &str) -> Option<&UserFunction> {
        self.user_functions.get(name)
    }

    /// Returns `true` if a user-defined function is registered under
    /// `name`.
    #[must_use]
    pub fn has_user_function(&self, name: &str) -> bool {
        self.user_functions.contains_key(name)
    }

    /// Removes and returns the user-defined function registered under
    /// `name`, notifying the change observer when one was present.
    pub fn undefine_function(&mut self, name: &str) -> Option<UserFunction> {
        let removed = self.user_functions.remove(name);
        if removed.is_some() {
            self.notify(name);
        }
        removed
    }

    /// Removes all user-defined functions, notifying the change observer
    /// once per removed name.
    pub fn clear_user_functions(&mut self) {
        let names: Vec<String> = self.user_functions.keys().cloned().collect();
        self.user_functions.clear();
        for name in &names {
            self.notify(name);
        }
    }

    /// Lists all user-defined function names, sorted.
    #[must_use]
    pub fn list_user_functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.user_functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Installs a change observer invoked with the function name whenever a
    /// user-defined function is defined or undefined.
    ///
    /// Collaborators use this for persistence or cache invalidation; the
    /// engine itself attaches no meaning to it.
    pub fn set_change_observer(&mut self, observer: impl Fn(&str) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    fn notify(&self, name: &str) {
        if let Some(observer) = &self.observer {
            observer(name);
        }
    }
}
