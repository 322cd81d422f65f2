// ==========================================
// Sample data generator
// ==========================================
// Writes data/customers.csv and data/orders.xml with a small dataset
// that exercises every cleaning rule: synonym regions, malformed
// mobiles, mixed date formats, duplicates, orphans, and bad amounts.
//
// Usage: cargo run --bin generate_test_data
// ==========================================

use std::fs;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let data_dir = Path::new("data");
    fs::create_dir_all(data_dir)?;

    write_customers(&data_dir.join("customers.csv"))?;
    write_orders(&data_dir.join("orders.xml"))?;

    println!("sample data written to {}", data_dir.display());
    Ok(())
}

fn write_customers(path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["customer_id", "name", "mobile_number", "region", "created_at"])?;

    let rows: &[[&str; 5]] = &[
        ["1", "  amit   sharma ", "9876543210", "north", "2023-11-02"],
        ["2", "BEENA RAO", "+91 9876501234", "South India", "2023-12-15"],
        ["3", "chetan patel", "91234-56780", "NORTH", ""],
        ["4", "Divya Nair", "99887 76655", "western", "2024-01-20"],
        ["5", "esha khan", "12345", "Atlantis", "2024-02-01"],
        ["6", "Farhan Ali", "9000011111", "East", "2024-02-11"],
        ["6", "Duplicate Farhan", "9000011111", "East", "2024-02-12"],
        ["", "No Id", "9111111111", "West", "2024-02-13"],
    ];
    for row in rows {
        writer.write_record(*row)?;
    }

    writer.flush()?;
    Ok(())
}

fn write_orders(path: &Path) -> anyhow::Result<()> {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<orders>
    <order>
        <order_id>10</order_id>
        <customer_id>1</customer_id>
        <order_date>2024-01-05</order_date>
        <amount>100.50</amount>
        <status>delivered</status>
    </order>
    <order>
        <order_id>11</order_id>
        <customer_id>1</customer_id>
        <order_date>10/02/2024</order_date>
        <amount>1,200</amount>
        <status>delivered</status>
    </order>
    <order>
        <order_id>12</order_id>
        <customer_id>2</customer_id>
        <order_date>15-03-2024</order_date>
        <amount>49.99</amount>
        <status>shipped</status>
    </order>
    <order>
        <order_id>13</order_id>
        <customer_id>3</customer_id>
        <order_date>2024/03/20</order_date>
        <amount>75</amount>
    </order>
    <order>
        <order_id>14</order_id>
        <customer_id>4</customer_id>
        <order_date>2024-03-25</order_date>
        <amount>300</amount>
        <status>pending</status>
    </order>
    <order>
        <order_id>15</order_id>
        <customer_id>99</customer_id>
        <order_date>2024-03-26</order_date>
        <amount>10</amount>
    </order>
    <order>
        <order_id>16</order_id>
        <customer_id>2</customer_id>
        <order_date>someday</order_date>
        <amount>10</amount>
    </order>
    <order>
        <order_id>17</order_id>
        <customer_id>3</customer_id>
        <order_date>2024-03-27</order_date>
        <amount>-5</amount>
    </order>
    <order>
        <order_id>12</order_id>
        <customer_id>2</customer_id>
        <order_date>2024-03-28</order_date>
        <amount>60</amount>
    </order>
</orders>
"#;
    fs::write(path, xml)?;
    Ok(())
}
