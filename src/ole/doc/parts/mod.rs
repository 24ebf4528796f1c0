/// Binary structures of the WordDocument and table streams.
///
/// - FIB (File Information Block)
/// - Piece table
/// - Character and paragraph FKPs
/// - The character stream itself
pub mod fib;
pub mod fkp;
pub mod piece_table;
pub mod text;
