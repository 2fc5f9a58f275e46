/// AST (Abstract Syntax Tree) module
///
/// Submodules:
/// - ast: `Program` and the `Stmt` / `Expr` enums
/// - expressions: expression node structs
/// - statements: statement node structs
pub mod ast;
pub mod expressions;
pub mod statements;
