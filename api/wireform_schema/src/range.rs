// Copyright 2015-2023 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// One end-point of a [`Range`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bound<T> {
    value: T,
    inclusive: bool,
}

impl<T: Copy> Bound<T> {
    pub fn new(value: T, inclusive: bool) -> Self {
        Bound { value, inclusive }
    }

    pub fn inclusive(value: T) -> Self {
        Bound::new(value, true)
    }

    pub fn exclusive(value: T) -> Self {
        Bound::new(value, false)
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }
}

/// A possibly half-open interval over an ordered primitive type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range<T: Copy + PartialOrd> {
    min: Option<Bound<T>>,
    max: Option<Bound<T>>,
}

impl<T: Copy + PartialOrd> Range<T> {
    pub fn unbounded() -> Self {
        Range {
            min: None,
            max: None,
        }
    }

    pub fn lower_bounded(min: Bound<T>) -> Self {
        Range {
            min: Some(min),
            max: None,
        }
    }

    pub fn upper_bounded(max: Bound<T>) -> Self {
        Range {
            min: None,
            max: Some(max),
        }
    }

    pub fn bounded(min: Bound<T>, max: Bound<T>) -> Self {
        Range {
            min: Some(min),
            max: Some(max),
        }
    }

    /// An interval including both of its end-points.
    pub fn inclusive(min: T, max: T) -> Self {
        Range::bounded(Bound::inclusive(min), Bound::inclusive(max))
    }

    pub fn min(&self) -> Option<Bound<T>> {
        self.min
    }

    pub fn max(&self) -> Option<Bound<T>> {
        self.max
    }

    /// Determine whether a value lies within the interval.
    pub fn contains(&self, value: T) -> bool {
        let lower = self
            .min
            .map(|Bound { value: lb, inclusive }| {
                if inclusive {
                    lb <= value
                } else {
                    lb < value
                }
            })
            .unwrap_or(true);
        let upper = self
            .max
            .map(|Bound { value: ub, inclusive }| {
                if inclusive {
                    ub >= value
                } else {
                    ub > value
                }
            })
            .unwrap_or(true);
        lower && upper
    }
}
