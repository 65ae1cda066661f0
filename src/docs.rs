// SPDX-FileCopyrightText: The pixelfont authors
// SPDX-License-Identifier: MPL-2.0

//! Documentation and format specification

#![doc = include_str!("../README.md")]
