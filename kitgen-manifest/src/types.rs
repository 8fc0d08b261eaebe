//! Go type strings to [`TypeExpr`].
//!
//! Supported forms: `*T`, `[]T`, `[N]T`, `map[K]V`, `...T`, `interface{}`,
//! `alias.Name` and bare names. Bare names that are not Go built-ins belong
//! to the service package.

use std::collections::BTreeMap;

use kitgen_ir::TypeExpr;

const BUILTINS: &[&str] = &[
    "any", "bool", "byte", "complex64", "complex128", "error", "float32", "float64", "int",
    "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8", "uint16", "uint32",
    "uint64", "uintptr",
];

/// Resolves package aliases while parsing.
///
/// Aliases missing from the table are taken as import paths themselves,
/// which covers the standard library (`context`, `time`).
pub struct TypeParser<'a> {
    service_path: &'a str,
    imports: &'a BTreeMap<String, String>,
}

impl<'a> TypeParser<'a> {
    pub fn new(service_path: &'a str, imports: &'a BTreeMap<String, String>) -> Self {
        Self {
            service_path,
            imports,
        }
    }

    /// Parse a complete type string. Errors carry a reason for diagnostics.
    pub fn parse(&self, ty: &str) -> Result<TypeExpr, String> {
        let mut cursor = Cursor { rest: ty.trim() };
        if cursor.rest.is_empty() {
            return Err("type is empty".to_string());
        }
        let expr = self.parse_type(&mut cursor)?;
        if !cursor.rest.trim().is_empty() {
            return Err(format!("unexpected '{}'", cursor.rest.trim()));
        }
        Ok(expr)
    }

    fn parse_type(&self, cursor: &mut Cursor<'_>) -> Result<TypeExpr, String> {
        cursor.skip_ws();
        if cursor.eat("...") {
            return Ok(TypeExpr::variadic(self.parse_type(cursor)?));
        }
        if cursor.rest.starts_with('*') {
            let mut depth = 0;
            while cursor.eat("*") {
                depth += 1;
            }
            return Ok(TypeExpr::pointer(depth, self.parse_type(cursor)?));
        }
        if cursor.eat("[]") {
            return Ok(TypeExpr::slice(self.parse_type(cursor)?));
        }
        if cursor.eat("[") {
            let len = cursor.take_while(|c| c.is_ascii_digit());
            let len: usize = len
                .parse()
                .map_err(|_| "array length must be a number".to_string())?;
            cursor.expect("]")?;
            return Ok(TypeExpr::array(len, self.parse_type(cursor)?));
        }
        if cursor.eat("map[") {
            let key = self.parse_type(cursor)?;
            cursor.skip_ws();
            cursor.expect("]")?;
            return Ok(TypeExpr::map(key, self.parse_type(cursor)?));
        }
        if cursor.eat("interface") {
            cursor.skip_ws();
            cursor.expect("{")?;
            cursor.skip_ws();
            cursor.expect("}")?;
            return Ok(TypeExpr::interface(Vec::new()));
        }
        self.parse_name(cursor)
    }

    fn parse_name(&self, cursor: &mut Cursor<'_>) -> Result<TypeExpr, String> {
        let first = cursor.ident()?;
        if !cursor.eat(".") {
            if BUILTINS.contains(&first) {
                return Ok(TypeExpr::named(first));
            }
            return Ok(TypeExpr::qualified(self.service_path, first));
        }
        let name = cursor.ident()?;
        let path = self
            .imports
            .get(first)
            .map(String::as_str)
            .unwrap_or(first);
        Ok(TypeExpr::qualified(path, name))
    }
}

struct Cursor<'s> {
    rest: &'s str,
}

impl<'s> Cursor<'s> {
    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, token: &str) -> bool {
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), String> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(format!("expected '{}'", token))
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'s str {
        let end = self.rest.find(|c: char| !pred(c)).unwrap_or(self.rest.len());
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    fn ident(&mut self) -> Result<&'s str, String> {
        let ident = self.take_while(|c| c.is_alphanumeric() || c == '_');
        match ident.chars().next() {
            Some(c) if !c.is_ascii_digit() => Ok(ident),
            _ => Err("expected a type name".to_string()),
        }
    }
}
