fn main() {
    nebula_strategy_lib::run()
}
