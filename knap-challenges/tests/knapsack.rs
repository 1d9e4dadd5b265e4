use knap_challenges::knapsack::*;
use knap_challenges::KnapsackError;

const SAMPLE: &str = "3 50\n60 10\n100 20\n120 30\n";

#[test]
fn test_parse_sample_instance() {
    let challenge = Challenge::from_input_str(SAMPLE).unwrap();
    assert_eq!(challenge.num_items, 3);
    assert_eq!(challenge.capacity, 50);
    assert_eq!(challenge.items[1], Item::new(1, 100, 20));
    assert_eq!(challenge.items[0].density, 6.0);
}

#[test]
fn test_parse_ignores_blank_lines() {
    let challenge: Challenge = "\n2 10\n\n5 5\n  \n6 4\n\n".parse().unwrap();
    assert_eq!(challenge.num_items, 2);
    assert_eq!(challenge.items[1].index, 1);
}

#[test]
fn test_parse_empty_instance() {
    let challenge = Challenge::from_input_str("0 10").unwrap();
    assert_eq!(challenge.num_items, 0);
    assert!(challenge.items.is_empty());
}

#[test]
fn test_parse_malformed_input() {
    let cases = [
        "",
        "3",
        "3 50 7\n1 1\n1 1\n1 1",
        "x 50",
        "1 50\n10 ten",
        "1 50\n10",
        "-1 50",
    ];
    for case in cases {
        let err = Challenge::from_input_str(case).unwrap_err();
        assert!(err.is_malformed(), "{:?} gave {:?}", case, err);
    }
    assert_eq!(
        Challenge::from_input_str("1 50\n10 ten").unwrap_err(),
        KnapsackError::MalformedInput {
            line: 2,
            reason: "'ten' is not an integer".to_string()
        }
    );
}

#[test]
fn test_parse_invalid_instance() {
    assert_eq!(
        Challenge::from_input_str("1 -5\n10 5").unwrap_err(),
        KnapsackError::InvalidCapacity { capacity: -5 }
    );
    assert_eq!(
        Challenge::from_input_str("2 5\n10 5\n3 0").unwrap_err(),
        KnapsackError::InvalidWeight {
            index: 1,
            weight: 0
        }
    );
    assert_eq!(
        Challenge::from_input_str("1 5\n-3 2").unwrap_err(),
        KnapsackError::InvalidValue {
            index: 0,
            value: -3
        }
    );
    assert_eq!(
        Challenge::from_input_str("3 5\n1 1\n2 2").unwrap_err(),
        KnapsackError::ItemCountMismatch {
            declared: 3,
            found: 2
        }
    );
    assert_eq!(
        Challenge::from_input_str("1 5\n1 1\n2 2").unwrap_err(),
        KnapsackError::ItemCountMismatch {
            declared: 1,
            found: 2
        }
    );
    assert!(!Challenge::from_input_str("1 5\n1 -1")
        .unwrap_err()
        .is_malformed());
}

#[test]
fn test_zero_capacity_is_valid() {
    let challenge = Challenge::from_pairs(&[(10, 5)], 0).unwrap();
    assert_eq!(challenge.capacity, 0);
}

#[test]
fn test_input_string_roundtrip() {
    let challenge = Challenge::from_input_str(SAMPLE).unwrap();
    let reparsed = Challenge::from_input_str(&challenge.to_input_string()).unwrap();
    assert_eq!(reparsed.items, challenge.items);
    assert_eq!(reparsed.capacity, challenge.capacity);
}

#[test]
fn test_solution_select_tracks_value() {
    let challenge = Challenge::from_input_str(SAMPLE).unwrap();
    let mut solution = Solution::new(challenge.num_items, true);
    solution.select(&challenge.items[1]);
    solution.select(&challenge.items[2]);
    solution.select(&challenge.items[2]);
    assert_eq!(solution.total_value, 220);
    assert_eq!(solution.items(), vec![1, 2]);
    assert_eq!(solution.total_weight(&challenge), 50);
}

#[test]
fn test_solution_output_format() {
    let solution = Solution {
        total_value: 220,
        is_optimal: true,
        taken: vec![false, true, true],
    };
    assert_eq!(solution.to_string(), "220 1\n0 1 1");
    assert_eq!(Solution::from_output_str("220 1\n0 1 1\n").unwrap(), solution);
    assert_eq!("220 1\n0 1 1".parse::<Solution>().unwrap(), solution);
    assert!("220 1\n0 1 x".parse::<Solution>().unwrap_err().is_malformed());

    let empty = Solution::new(0, false);
    assert_eq!(empty.to_string(), "0 0\n");
    assert_eq!(Solution::from_output_str(&empty.to_string()).unwrap(), empty);
}

#[test]
fn test_solution_output_rejects_garbage() {
    assert!(Solution::from_output_str("").is_err());
    assert!(Solution::from_output_str("220\n0 1 1").is_err());
    assert!(Solution::from_output_str("220 2\n0 1 1").is_err());
    assert!(Solution::from_output_str("220 1\n0 1 2").is_err());
    assert!(Solution::from_output_str("220 1\n0 1 1\n1").is_err());
}

#[test]
fn test_verify_solution() {
    let challenge = Challenge::from_input_str(SAMPLE).unwrap();

    let valid = Solution::from_output_str("220 1\n0 1 1").unwrap();
    assert_eq!(challenge.verify_solution(&valid).unwrap(), 220);

    let overweight = Solution::from_output_str("280 1\n1 1 1").unwrap();
    assert!(challenge.verify_solution(&overweight).is_err());

    let wrong_value = Solution::from_output_str("200 1\n0 1 1").unwrap();
    assert!(challenge.verify_solution(&wrong_value).is_err());

    let wrong_length = Solution::from_output_str("100 1\n0 1").unwrap();
    assert!(challenge.verify_solution(&wrong_length).is_err());
}

#[test]
fn test_verify_solution_rejects_inconsistent_instance() {
    let mut challenge = Challenge::from_input_str(SAMPLE).unwrap();
    challenge.items.truncate(2);
    let solution = Solution::from_output_str("120 1\n0 0 1").unwrap();
    assert!(challenge.verify_solution(&solution).is_err());
}

#[test]
fn test_generate_instance_is_deterministic() {
    let track = Track {
        num_items: 40,
        max_weight: 20,
        max_value: 70,
        budget: 30,
    };
    let a = Challenge::generate_instance(&[7u8; 32], &track).unwrap();
    let b = Challenge::generate_instance(&[7u8; 32], &track).unwrap();
    let c = Challenge::generate_instance(&[8u8; 32], &track).unwrap();

    assert_eq!(a.items, b.items);
    assert_eq!(a.capacity, b.capacity);
    assert_ne!(a.items, c.items);

    assert_eq!(a.num_items, 40);
    let total_weight: u64 = a.items.iter().map(|item| item.weight as u64).sum();
    assert_eq!(a.capacity as u64, total_weight * 30 / 100);
    for (i, item) in a.items.iter().enumerate() {
        assert_eq!(item.index, i);
        assert!((1..=20).contains(&item.weight));
        assert!(item.value <= 70);
    }
}

#[test]
fn test_generate_instance_rejects_zero_weight_track() {
    let track = Track {
        max_weight: 0,
        ..Track::default()
    };
    assert!(Challenge::generate_instance(&[0u8; 32], &track).is_err());
}
