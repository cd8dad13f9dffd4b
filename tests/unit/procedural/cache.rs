use super::*;

#[test]
fn cached_equals_uncached() {
    let cache = FieldCache::default();
    let params = FieldParams::default();
    let cached = cache.get_or_generate(40, &params).unwrap();
    let again = cache.get_or_generate(40, &params).unwrap();
    let fresh = generate_field(40, &params).unwrap();
    assert_eq!(&cached[..], &fresh[..]);
    assert!(Arc::ptr_eq(&cached, &again));
    assert_eq!(cache.len(), 1);
}

#[test]
fn keys_distinguish_count_and_params() {
    let cache = FieldCache::default();
    let params = FieldParams::default();
    let other = FieldParams {
        max_delay: 10.0,
        ..params
    };
    cache.get_or_generate(10, &params).unwrap();
    cache.get_or_generate(11, &params).unwrap();
    cache.get_or_generate(10, &other).unwrap();
    assert_eq!(cache.len(), 3);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn evicts_least_recently_used() {
    let cache = FieldCache::new(NonZeroUsize::new(2).unwrap());
    let params = FieldParams::default();
    cache.get_or_generate(1, &params).unwrap();
    cache.get_or_generate(2, &params).unwrap();
    cache.get_or_generate(3, &params).unwrap();
    assert_eq!(cache.len(), 2);
}

#[test]
fn poisoned_lock_falls_back_to_generation() {
    let cache = Arc::new(FieldCache::default());
    let poison = Arc::clone(&cache);
    let _ = std::thread::spawn(move || {
        let _guard = poison.inner.lock().unwrap();
        panic!("poison the cache lock");
    })
    .join();

    let params = FieldParams::default();
    let field = cache.get_or_generate(5, &params).unwrap();
    assert_eq!(&field[..], &generate_field(5, &params).unwrap()[..]);
}

#[test]
fn invalid_params_are_not_cached() {
    let cache = FieldCache::default();
    let params = FieldParams {
        max_delay: -1.0,
        ..FieldParams::default()
    };
    assert!(cache.get_or_generate(5, &params).is_err());
    assert!(cache.is_empty());
}
