// Copyright (c) Campusledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod export;
pub mod funding;
pub mod ledger;
pub mod normalize;
pub mod period;
