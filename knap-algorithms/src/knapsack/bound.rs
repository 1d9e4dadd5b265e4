use knap_challenges::knapsack::Item;

/// Continuous-relaxation bound for `items` already in descending density order.
///
/// Items are taken whole while they fit; the first one that does not is taken
/// fractionally and the scan stops. No 0/1 selection of the same items can beat it.
pub fn upper_bound(items: &[Item], capacity: u32) -> f64 {
    debug_assert!(items.windows(2).all(|w| w[0].density >= w[1].density));

    let mut remaining = capacity;
    // Whole part stays integral; only the sub-unit remainder is a float
    let mut whole: u64 = 0;
    let mut fraction = 0.0;
    for item in items {
        if remaining == 0 {
            break;
        }
        if item.weight <= remaining {
            remaining -= item.weight;
            whole += item.value as u64;
        } else {
            let scaled = remaining as u64 * item.value as u64;
            whole += scaled / item.weight as u64;
            fraction = (scaled % item.weight as u64) as f64 / item.weight as f64;
            break;
        }
    }
    whole as f64 + fraction
}
