//! Integer kernels: factorization, extended gcd, prime counting

/// Largest argument accepted by `prime_pi`
pub const MAX_SIEVE: u64 = 10_000_000;
/// Largest index accepted by `nth_prime`
pub const MAX_PRIME_INDEX: u64 = 500_000;

const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Deterministic Miller-Rabin for every u64
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for p in WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }
    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }
    'witness: for a in WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// A nontrivial factor of an odd composite
fn pollard_rho(n: u64) -> u64 {
    for c in 1..n {
        let step = |x: u64| (mul_mod(x, x, n) + c) % n;
        let (mut x, mut y, mut d) = (2u64, 2u64, 1u64);
        while d == 1 {
            x = step(x);
            y = step(step(y));
            d = gcd(x.abs_diff(y), n);
        }
        if d != n {
            return d;
        }
    }
    n
}

fn collect_factors(n: u64, out: &mut Vec<u64>) {
    if n == 1 {
        return;
    }
    if is_prime(n) {
        out.push(n);
        return;
    }
    let d = pollard_rho(n);
    collect_factors(d, out);
    collect_factors(n / d, out);
}

/// `(prime, multiplicity)` pairs in ascending order; empty for 1
pub fn factorize(mut n: u64) -> Vec<(u64, u32)> {
    let mut primes = Vec::new();
    for p in [2u64, 3, 5, 7, 11, 13] {
        while n > 1 && n % p == 0 {
            primes.push(p);
            n /= p;
        }
    }
    collect_factors(n, &mut primes);
    primes.sort_unstable();

    let mut factors: Vec<(u64, u32)> = Vec::new();
    for p in primes {
        match factors.last_mut() {
            Some((q, m)) if *q == p => *m += 1,
            _ => factors.push((p, 1)),
        }
    }
    factors
}

/// `(g, u, v)` with `g = u·a + v·b` and `g ≥ 0`
///
/// `(a, 0)` gives `(|a|, sign(a), 0)`, `(0, b)` gives `(|b|, 0, sign(b))`
/// and `(0, 0)` gives `(0, 1, 0)`.
pub fn extended_gcd(a: i64, b: i64) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a as i128, b as i128);
    let (mut old_s, mut s) = (1i128, 0i128);
    let (mut old_t, mut t) = (0i128, 1i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }
    if old_r < 0 {
        (-old_r, -old_s, -old_t)
    } else {
        (old_r, old_s, old_t)
    }
}

/// Sieve of Eratosthenes up to and including `max`
fn sieve(max: usize) -> Vec<bool> {
    let mut is_prime = vec![true; max + 1];
    is_prime[0] = false;
    if max >= 1 {
        is_prime[1] = false;
    }
    let mut i = 2;
    while i * i <= max {
        if is_prime[i] {
            let mut j = i * i;
            while j <= max {
                is_prime[j] = false;
                j += i;
            }
        }
        i += 1;
    }
    is_prime
}

/// Number of primes ≤ n, for n ≤ `MAX_SIEVE`
pub fn prime_pi(n: u64) -> Option<u64> {
    if n > MAX_SIEVE {
        return None;
    }
    if n < 2 {
        return Some(0);
    }
    Some(sieve(n as usize).iter().filter(|&&p| p).count() as u64)
}

/// The n-th prime, 1-based, for 1 ≤ n ≤ `MAX_PRIME_INDEX`
pub fn nth_prime(n: u64) -> Option<u64> {
    if n == 0 || n > MAX_PRIME_INDEX {
        return None;
    }
    // p_n < n (ln n + ln ln n) for n ≥ 6
    let bound = if n < 6 {
        15
    } else {
        let x = n as f64;
        (x * (x.ln() + x.ln().ln())) as usize + 1
    };
    sieve(bound)
        .iter()
        .enumerate()
        .filter(|(_, &p)| p)
        .nth(n as usize - 1)
        .map(|(i, _)| i as u64)
}
