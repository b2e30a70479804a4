// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! Symbolic differentiation of one-line expressions: parsing into a binary expression
//! tree, simplification, evaluation, repeated differentiation, Taylor expansion with a
//! little-o remainder, and output as text, tree notation, LaTeX and plots.
pub mod Utils;
pub mod symbolic;
