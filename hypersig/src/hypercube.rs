//! Layered enumeration of the hypercube {0..base-1}^dimension.
//!
//! Layer `d` is the set of vertices whose digits sum to `d`. The functions
//! here rank and unrank vertices within a layer: `find_layer` locates the
//! layer containing a global index, `map_to_vertex` turns a (layer, offset)
//! pair into the unique vertex at that position, and `map_to_integer` is its
//! inverse. Layer sizes exceed u128 for the larger parameter sets, so all
//! counting runs on `BigUint`.
//!
//! Layer-size tables are memoized per base behind a mutex; a table covers
//! every dimension up to [`MAX_DIMENSION`] so intermediate dimensions are
//! available to the unranking walk.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Largest supported hypercube dimension.
pub const MAX_DIMENSION: usize = 100;

/// Layer sizes and their inclusive prefix sums for one dimension.
struct LayerInfo {
    sizes: Vec<BigUint>,
    prefix_sums: Vec<BigUint>,
}

impl LayerInfo {
    fn from_sizes(sizes: Vec<BigUint>) -> Self {
        let mut prefix_sums = Vec::with_capacity(sizes.len());
        let mut acc = BigUint::zero();
        for size in &sizes {
            acc += size;
            prefix_sums.push(acc.clone());
        }
        Self { sizes, prefix_sums }
    }

    /// Sum of `sizes[start..=end]`.
    fn sum_in_range(&self, start: usize, end: usize) -> BigUint {
        if start > end {
            return BigUint::zero();
        }
        let total = &self.prefix_sums[end];
        if start == 0 {
            total.clone()
        } else {
            total - &self.prefix_sums[start - 1]
        }
    }
}

static LAYER_CACHE: LazyLock<Mutex<HashMap<usize, Arc<Vec<LayerInfo>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Layer tables for dimensions 0..=MAX_DIMENSION, memoized per base.
fn layer_data(base: usize) -> Arc<Vec<LayerInfo>> {
    let mut cache = LAYER_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache
        .entry(base)
        .or_insert_with(|| Arc::new(prepare_layer_data(base)))
        .clone()
}

fn prepare_layer_data(base: usize) -> Vec<LayerInfo> {
    assert!(base >= 2, "hypercube base must be at least 2");

    let mut all = Vec::with_capacity(MAX_DIMENSION + 1);
    // dimension 0: a single empty vertex, on layer 0
    all.push(LayerInfo::from_sizes(vec![BigUint::one()]));

    for v in 1..=MAX_DIMENSION {
        let prev: &LayerInfo = &all[v - 1];
        let max_layer = v * (base - 1);
        let mut sizes = Vec::with_capacity(max_layer + 1);
        for d in 0..=max_layer {
            // first digit x ranges over the values that leave a representable
            // remainder for the other v-1 digits
            let x_max = (base - 1).min(d);
            let x_min = d.saturating_sub((v - 1) * (base - 1));
            sizes.push(prev.sum_in_range(d - x_max, d - x_min));
        }
        all.push(LayerInfo::from_sizes(sizes));
    }
    all
}

/// Number of vertices on layer `layer` of {0..base-1}^dimension.
pub fn layer_size(base: usize, dimension: usize, layer: usize) -> BigUint {
    let data = layer_data(base);
    data[dimension].sizes[layer].clone()
}

/// Total number of vertices on layers 0..=final_layer.
pub fn total_size_up_to_layer(base: usize, dimension: usize, final_layer: usize) -> BigUint {
    let data = layer_data(base);
    data[dimension].prefix_sums[final_layer].clone()
}

/// Given a global index `x` (counting vertices layer by layer), find the
/// layer containing it and the offset of `x` within that layer.
pub fn find_layer(base: usize, dimension: usize, x: &BigUint) -> (usize, BigUint) {
    let data = layer_data(base);
    let info = &data[dimension];

    // smallest d with prefix_sums[d] > x
    let mut lo = 0;
    let mut hi = info.prefix_sums.len() - 1;
    while lo < hi {
        let mid = (lo + hi) / 2;
        if &info.prefix_sums[mid] > x {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    let offset = if lo == 0 {
        x.clone()
    } else {
        x - &info.prefix_sums[lo - 1]
    };
    (lo, offset)
}

/// Map `(layer, offset)` to the unique vertex at that position.
///
/// Digits are chosen most-significant first: within a layer, vertices are
/// ordered by their first digit, then recursively by the remainder.
pub fn map_to_vertex(base: usize, dimension: usize, layer: usize, offset: &BigUint) -> Vec<u8> {
    let data = layer_data(base);
    assert!(dimension <= MAX_DIMENSION, "dimension exceeds MAX_DIMENSION");
    assert!(layer <= dimension * (base - 1), "layer out of range");
    assert!(
        offset < &data[dimension].sizes[layer],
        "offset exceeds layer size"
    );

    let mut digits = Vec::with_capacity(dimension);
    let mut rem = offset.clone();
    let mut d_rem = layer;

    for i in 0..dimension {
        let r = dimension - 1 - i;
        let info = &data[r];
        let x_min = d_rem.saturating_sub(r * (base - 1));
        let x_max = (base - 1).min(d_rem);

        // walk buckets until the remainder lands inside one; the final
        // bucket always catches it because offset < layer size
        let mut x = x_min;
        while x < x_max {
            let bucket = &info.sizes[d_rem - x];
            if &rem < bucket {
                break;
            }
            rem -= bucket;
            x += 1;
        }

        digits.push(x as u8);
        d_rem -= x;
    }

    digits
}

/// Inverse of [`map_to_vertex`]: rank a vertex within its layer.
///
/// Returns the layer (the digit sum) and the offset within it.
pub fn map_to_integer(base: usize, vertex: &[u8]) -> (usize, BigUint) {
    let dimension = vertex.len();
    let data = layer_data(base);
    let layer: usize = vertex.iter().map(|&x| x as usize).sum();

    let mut offset = BigUint::zero();
    let mut d_rem = layer;

    for (i, &digit) in vertex.iter().enumerate() {
        let r = dimension - 1 - i;
        let info = &data[r];
        let x_min = d_rem.saturating_sub(r * (base - 1));
        for x in x_min..digit as usize {
            offset += &info.sizes[d_rem - x];
        }
        d_rem -= digit as usize;
    }

    (layer, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;
    use proptest::prelude::*;

    #[test]
    fn test_layer_sizes_dim3_base3() {
        let sizes: Vec<u64> = (0..=6)
            .map(|d| layer_size(3, 3, d).to_u64().unwrap())
            .collect();
        assert_eq!(sizes, vec![1, 3, 6, 7, 6, 3, 1]);
    }

    #[test]
    fn test_total_size_covers_whole_cube() {
        // layers 0..=v*(base-1) partition the cube
        assert_eq!(total_size_up_to_layer(3, 3, 6).to_u64().unwrap(), 27);
        assert_eq!(total_size_up_to_layer(2, 10, 10).to_u64().unwrap(), 1024);
        assert_eq!(total_size_up_to_layer(8, 4, 28).to_u64().unwrap(), 4096);
    }

    #[test]
    fn test_enumeration_round_trip_dim3_base3() {
        for i in 0u64..27 {
            let x = BigUint::from(i);
            let (layer, offset) = find_layer(3, 3, &x);
            let vertex = map_to_vertex(3, 3, layer, &offset);
            assert_eq!(vertex.len(), 3);
            assert_eq!(vertex.iter().map(|&v| v as usize).sum::<usize>(), layer);

            let (layer_back, offset_back) = map_to_integer(3, &vertex);
            assert_eq!(layer_back, layer);
            assert_eq!(offset_back, offset);
        }
    }

    #[test]
    fn test_distinct_indices_give_distinct_vertices() {
        let mut seen = std::collections::HashSet::new();
        for i in 0u64..27 {
            let (layer, offset) = find_layer(3, 3, &BigUint::from(i));
            seen.insert(map_to_vertex(3, 3, layer, &offset));
        }
        assert_eq!(seen.len(), 27);
    }

    proptest! {
        #[test]
        fn prop_round_trip(base in 2usize..6, dimension in 1usize..8, seed in any::<u64>()) {
            let cube_size = total_size_up_to_layer(base, dimension, dimension * (base - 1));
            let x = BigUint::from(seed) % &cube_size;
            let (layer, offset) = find_layer(base, dimension, &x);
            let vertex = map_to_vertex(base, dimension, layer, &offset);
            prop_assert!(vertex.iter().all(|&v| (v as usize) < base));
            let (layer_back, offset_back) = map_to_integer(base, &vertex);
            prop_assert_eq!(layer_back, layer);
            prop_assert_eq!(offset_back, offset);
        }
    }
}
