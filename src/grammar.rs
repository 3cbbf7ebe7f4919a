//! Shift Spec Key and Path Grammar
//!
//! This module documents the grammar of spec keys (left-hand sides) and output paths
//! (right-hand sides) as implemented by this library.
//!
//! # Overview
//!
//! A shift spec is a nested JSON mapping. Keys say which input keys to match at that
//! level of the input document; string values say where the matched data is written.
//!
//! ```text
//! {
//!   "rating": {
//!     "primary": {
//!       "value": "Rating"
//!     },
//!     "*": {
//!       "value": "SecondaryRatings.&1.Value",
//!       "$": "SecondaryRatings.&.Id"
//!     }
//!   }
//! }
//! ```
//!
//! # Keys
//!
//! Each key is classified into exactly one element kind. The rules are checked in
//! this order, against the key with its escapes and escaped characters removed; the
//! first rule that fires wins:
//!
//! | # | Rule | Kind | Example |
//! |---|------|------|---------|
//! | 1 | key is exactly `@` | `At` | `@` |
//! | 2 | key is exactly `*` | `StarAll` | `*` |
//! | 3 | starts with `[` (one `[`, one `]`) | `Array` | `[2]`, `[&1]` |
//! | 4 | starts with `@` or contains `@(` | `Transpose` | `@(1,id)`, `@id` |
//! | 5 | contains `@` elsewhere | error | `a@b` |
//! | 6 | contains `$` | `Dollar` | `$`, `$1` |
//! | 7 | contains `[` (one `[`, one `]`) | `Array` | `photos[&1]` |
//! | 8 | contains `&` (and no `*`) | `Amp` | `&`, `&(1,1)`, `rating-&1` |
//! | 9 | contains `*`: one, two, or more | `StarSingle` / `StarDouble` / `StarRegex` | `rating-*`, `*-*`, `a*b*c*` |
//! | 10 | contains `#` | `Hash` | `#2`, `#value` |
//! | 11 | anything else | `Literal` | `rating` |
//!
//! **Rules**:
//! - A key can not mix `*` and `&`: `a&*b` is rejected
//! - `Array` keys hold exactly one `[` and one `]`: `[1][2]` is rejected
//! - `@` is only valid at the front of a key, or as part of `@(`
//! - `@` on its own is only valid on the left-hand side
//!
//! # Escapes
//!
//! A backslash makes the next character plain text. The classifier never sees an
//! escaped character; the stored key keeps it without the backslash:
//!
//! | Raw key | Classified as | Stored key |
//! |---------|---------------|------------|
//! | `\@pants` | `Literal` | `@pants` |
//! | `rating-\&pants` | `Literal` | `rating-&pants` |
//! | `rating\\pants` | `Literal` | `rating\pants` |
//! | `rating-\*` | `Literal` | `rating-*` |
//!
//! A trailing lone backslash is dropped.
//!
//! # Transposes
//!
//! A transpose pulls data from elsewhere in the matched input:
//!
//! ```text
//! @3              3 levels up, the matched node itself
//! @foo            the current level, path "foo"
//! @(foo.bar)      the current level, path "foo.bar"
//! @(2,foo.bar)    2 levels up, path "foo.bar"
//! ```
//!
//! Transposes can not contain `*`, `[]` or a nested `@`.
//!
//! # Output Paths
//!
//! Output paths are dot-separated. Each segment is classified with the key rules
//! above, except that a bare `@` segment is rejected.
//!
//! ## Bracket Sugar
//!
//! An unescaped `[` that does not follow `.` or `@` starts a new segment:
//!
//! ```text
//! data[2].&(1,1)   ->   data.[2].&(1,1)
//! ```
//!
//! ## Transposes in Paths
//!
//! `@a.b` and `@(a).b` both give the segments `@(a)` and `b`. Inside parentheses a `.`
//! is part of the transpose, so `@(a.b).c` gives `@(a.b)` and `c`. Parentheses do not
//! nest. A transpose inside an index stays part of the index segment:
//!
//! ```text
//! photos[@(1,id)].url   ->   photos  [@(1,id)]  url
//! photos[@1].url        ->   photos  [@(1)]     url
//! ```
//!
//! ## Escaped Dots
//!
//! `\.` is a literal dot inside a segment: `a\.b.c` has the two segments `a.b` and `c`.
//!
//! # Errors
//!
//! | Input | Error |
//! |-------|-------|
//! | `a&*b` | `InvalidKeySyntax` |
//! | `a@b` | `InvalidKeySyntax` |
//! | `[1][2]` | `InvalidKeySyntax` |
//! | `@(a.b` | `MismatchedParentheses` |
//! | `@(a(b))` | `MismatchedParentheses` |
//! | `a.@` | `SelfReferenceNotAllowed` |
//! | `a.@.b` | `EmptyTransposeExpression` |
//! | `@(2,)` | `EmptyTransposeExpression` |
//! | `@(,x)` | `InvalidKeySyntax` |
//!
//! # Spec Trees
//!
//! - A mapping value makes a composite node; a string or list of strings makes a leaf
//! - Literal keys, and `Array` keys with a plain number, are looked up by exact key
//! - Other keys are tried in this order: `&`, `@(...)`, `$`, `#`, `[...]`, multi-star,
//!   double-star, single-star, `*`, `@`
//! - At most one sibling claims an input key

// This module contains only documentation; no implementation code
