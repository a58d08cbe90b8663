use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `[0, bound)`.
    fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    fn pick<'a, T>(&mut self, slice: &'a [T]) -> &'a T {
        &slice[self.below(slice.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Each manager leads one regional team of salesmen.
    let teams: [(&str, &str, &[&str]); 3] = [
        ("Martha", "East", &["Alexander", "Steven", "Shelli"]),
        ("Douglas", "Central", &["Michael", "John", "David"]),
        ("Hermann", "West", &["Sigal", "Luis", "Karen"]),
    ];
    let items: [(&str, f64); 4] = [
        ("Television", 1198.0),
        ("Home Theater", 500.0),
        ("Cell Phone", 225.0),
        ("Desk", 125.0),
    ];

    let n_records = 150;

    let mut all_item: Vec<String> = Vec::with_capacity(n_records);
    let mut all_sales_man: Vec<String> = Vec::with_capacity(n_records);
    let mut all_manager: Vec<String> = Vec::with_capacity(n_records);
    let mut all_region: Vec<String> = Vec::with_capacity(n_records);
    let mut all_sale_amt: Vec<f64> = Vec::with_capacity(n_records);
    let mut all_units: Vec<i64> = Vec::with_capacity(n_records);

    for _ in 0..n_records {
        let (manager, region, salesmen) = rng.pick(&teams);
        let sales_man = rng.pick(salesmen);
        let (item, unit_price) = rng.pick(&items);
        let units = 1 + rng.below(90) as i64;

        all_item.push(item.to_string());
        all_sales_man.push(sales_man.to_string());
        all_manager.push(manager.to_string());
        all_region.push(region.to_string());
        all_sale_amt.push(units as f64 * unit_price);
        all_units.push(units);
    }

    // --- CSV ---
    let csv_path = "SaleData.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record(["Item", "SalesMan", "Manager", "Region", "Sale_amt", "Units"])
        .expect("Failed to write CSV header");
    for i in 0..n_records {
        let sale_amt = format!("{:.2}", all_sale_amt[i]);
        let units = all_units[i].to_string();
        writer
            .write_record([
                all_item[i].as_str(),
                all_sales_man[i].as_str(),
                all_manager[i].as_str(),
                all_region[i].as_str(),
                sale_amt.as_str(),
                units.as_str(),
            ])
            .expect("Failed to write CSV record");
    }
    writer.flush().expect("Failed to flush CSV");

    // --- Parquet ---
    let schema = Arc::new(Schema::new(vec![
        Field::new("Item", DataType::Utf8, false),
        Field::new("SalesMan", DataType::Utf8, false),
        Field::new("Manager", DataType::Utf8, false),
        Field::new("Region", DataType::Utf8, false),
        Field::new("Sale_amt", DataType::Float64, false),
        Field::new("Units", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                all_item.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                all_sales_man.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                all_manager.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                all_region.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(all_sale_amt)),
            Arc::new(Int64Array::from(all_units)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "SaleData.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n_records} sales records to {csv_path} and {parquet_path}");
}
