#![allow(dead_code)]

use ews_core::extraction::{RawTable, Sheet, Workbook};

fn sheet(name: &str, rows: Vec<Vec<&str>>) -> Sheet {
    Sheet::new(name, RawTable::from_rows(rows))
}

fn code_export_header() -> Vec<Vec<&'static str>> {
    vec![
        vec!["Company Name", "Acme Industrial"],
        vec!["Scaling", "Thousands"],
        vec!["FCC", "Statement Data", "2021", "2022"],
    ]
}

/// Two-sheet code export in thousands, FY2021-FY2022. No EBIT line and no
/// fixed-asset total, so both fallbacks apply.
pub fn code_export_workbook() -> Workbook {
    let mut balance = code_export_header();
    balance.extend([
        vec!["ATOT", "Total Assets", "480000", "500000"],
        vec!["STLB", "Total Liabilities", "250000", "300000"],
        vec!["STCA", "Total Current Assets", "200000", "220000"],
        vec!["SCLT", "Total Current Liabilities", "150000", "200000"],
        vec!["SPPE", "Property, Plant & Equipment - Net - Total", "180000", "190000"],
        vec!["SINN", "Intangible Assets - Total - Net", "20000", "10000"],
        vec![
            "QTEP",
            "Shareholders' Equity - Attributable to Parent Shareholders - Total",
            "230000",
            "200000",
        ],
        vec!["SRED", "Retained Earnings - Total", "90000", "80000"],
    ]);

    let mut income = code_export_header();
    income.extend([
        vec!["STLR", "Revenue from Business Activities - Total", "600000", "620000"],
        vec!["SIAT", "Net Income after Tax", "30000", "25000"],
        vec!["SIBT", "Income before Taxes", "38000", "32000"],
        vec!["SNII", "Interest Expense - Net of (Interest Income)", "12000", "8000"],
    ]);

    Workbook::new(vec![
        sheet("Balance Sheet", balance),
        sheet("Income Statement", income),
    ])
}

fn vietnamese_header() -> Vec<Vec<&'static str>> {
    vec![
        vec!["CÔNG TY CỔ PHẦN THÉP NAM VIỆT - Báo cáo tài chính hợp nhất"],
        vec!["Đơn vị tính: nghìn đồng"],
        vec!["Chỉ tiêu", "2021", "2022"],
    ]
}

/// Vietnamese statement in thousands of dong. 2021 is a watchlist year and
/// 2022 a distress year: EBIT falls below interest, liquidity drops under 1
/// and the company posts a loss.
pub fn vietnamese_workbook() -> Workbook {
    let mut balance = vietnamese_header();
    balance.extend([
        vec!["A. TÀI SẢN NGẮN HẠN", "300", "320"],
        vec!["1. Tài sản cố định hữu hình", "100", "110"],
        vec!["3. Tài sản cố định vô hình", "50", "40"],
        vec!["TỔNG CỘNG TÀI SẢN", "1000", "1100"],
        vec!["I. Nợ ngắn hạn", "200", "400"],
        vec!["C. NỢ PHẢI TRẢ", "600", "700"],
        vec!["D. VỐN CHỦ SỞ HỮU", "400", "400"],
        vec!["11. Lợi nhuận sau thuế chưa phân phối", "80", "60"],
    ]);

    let mut income = vietnamese_header();
    income.extend([
        vec!["1. Doanh thu bán hàng và cung cấp dịch vụ", "900", "950"],
        vec!["4. Doanh thu hoạt động tài chính", "5", "5"],
        vec!["7. Chi phí tài chính", "20", "30"],
        vec!["15. Tổng lợi nhuận kế toán trước thuế", "50", "-20"],
        vec!["18. Lợi nhuận sau thuế", "40", "-25"],
    ]);

    Workbook::new(vec![
        sheet("Cân đối kế toán", balance),
        sheet("Kết quả kinh doanh", income),
    ])
}

/// A single sheet with a year header and nothing the detector recognises.
pub fn unlabelled_workbook() -> Workbook {
    Workbook::new(vec![sheet(
        "Sheet1",
        vec![vec!["Report", "2022"], vec!["something", "5"]],
    )])
}
