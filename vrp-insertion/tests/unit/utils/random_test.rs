use super::*;

fn sample(random: &dyn Random) -> Vec<Vec<usize>> {
    (0..3)
        .map(|_| {
            let mut values = (0..10).collect::<Vec<usize>>();
            values.shuffle(&mut random.get_rng());
            values
        })
        .collect()
}

#[test]
fn can_repeat_sequence_with_the_same_seed() {
    let first = sample(&DefaultRandom::new_repeatable(42));
    let second = sample(&DefaultRandom::new_repeatable(42));

    assert_eq!(first, second);
}

#[test]
fn can_return_different_generators_on_subsequent_calls() {
    let random = DefaultRandom::new_repeatable(0);

    let first = random.get_rng().next_u64();
    let second = random.get_rng().next_u64();

    assert_ne!(first, second);
}

#[test]
fn can_sample_within_range_without_seed() {
    let random = DefaultRandom::default();

    (0..100).for_each(|_| {
        let value = random.get_rng().gen_range(-3..=3);
        assert!((-3..=3).contains(&value));
    });
}
