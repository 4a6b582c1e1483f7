use primecore::{factorize, get_single_factor_pollard_rho, greatest_common_divisor, is_prime, Factors};

fn main() {
    println!("primecore basic usage");
    println!("=====================\n");

    let candidates = [67967u128, 8_589_934_592, 18_446_744_073_709_551_557];
    for n in candidates {
        println!("is_prime({n}) = {}", is_prime(n));
    }

    println!();
    let n = 40_000_000_025u128;
    let mut sink: Vec<u128> = Vec::new();
    let mut loc_lcg = 0u64;
    factorize(n, &mut sink, &mut loc_lcg);
    sink.sort_unstable();
    println!("factorize({n}) = {sink:?}");

    let mut factors: Factors<u128> = Factors::new();
    let mut loc_lcg = 0u64;
    factorize(n, &mut factors, &mut loc_lcg);
    print!("as a multiset: ");
    for (prime, exponent) in factors.iter() {
        print!("{prime}^{exponent} ");
    }
    println!();

    println!();
    let composite = 1_000_003u128 * 1_000_033;
    let mut loc_lcg = 0u64;
    if let Some(factor) = get_single_factor_pollard_rho(composite, &mut loc_lcg, 64) {
        println!("get_single_factor_pollard_rho({composite}) found {factor}");
    }

    println!();
    println!(
        "greatest_common_divisor(1071, 462) = {}",
        greatest_common_divisor(1071, 462).expect("1071 and 462 are not both zero")
    );
    match greatest_common_divisor(0u128, 0) {
        Ok(_) => unreachable!(),
        Err(e) => println!("greatest_common_divisor(0, 0) correctly errors: {e}"),
    }
}
